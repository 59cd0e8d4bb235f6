// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with click mode selection and navigation buttons.

use crate::models::state::Mode;
use crate::session::Session;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    SetMode(Mode),
    ToggleAutoBox,
    Previous,
    Next,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, session: &Session) -> ToolbarAction {
    let mut action = ToolbarAction::None;
    let mode = session.mode();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Mode:");

        ui.separator();

        if ui.selectable_label(mode == Mode::Point, "• Point (z)").clicked() {
            action = ToolbarAction::SetMode(Mode::Point);
        }

        if ui.selectable_label(mode == Mode::Box, "▭ Box (x)").clicked() {
            action = ToolbarAction::SetMode(Mode::Box);
        }

        let mut auto_box = session.auto_box_enabled();
        if ui.checkbox(&mut auto_box, "Auto Box (b)").changed() {
            action = ToolbarAction::ToggleAutoBox;
        }

        ui.separator();

        let navigator = session.navigator();
        if ui
            .add_enabled(navigator.has_previous(), egui::Button::new("◀ Previous (a)"))
            .clicked()
        {
            action = ToolbarAction::Previous;
        }
        if ui
            .add_enabled(navigator.has_next(), egui::Button::new("Next (d) ▶"))
            .clicked()
        {
            action = ToolbarAction::Next;
        }

        if !navigator.is_empty() {
            ui.label(format!("{} / {}", navigator.index() + 1, navigator.len()));
        }

        ui.separator();

        let hint = match mode {
            Mode::Point => "Click to add a keypoint",
            Mode::Box => "Click two opposite corners to draw the box",
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
