// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the labeling session to the window: menus, toolbar,
//! keyboard shortcuts, the gallery panel and the canvas. All annotation
//! logic lives in [`Session`]; this layer only forwards input and reports
//! failures.

use crate::config::AppConfig;
use crate::io::{media, serialization};
use crate::models::state::Mode;
use crate::session::Session;
use crate::ui::{canvas, gallery::Gallery, toolbar};
use std::path::{Path, PathBuf};

/// Main application state.
pub struct KpLabelApp {
    /// Labeling session driven by the UI
    session: Session,

    /// Preferences the app was started with
    config: AppConfig,

    /// Texture of the active image
    image_texture: Option<egui::TextureHandle>,

    /// Image the texture was created from
    texture_path: Option<PathBuf>,

    /// Thumbnail panel
    gallery: Gallery,

    /// Last canvas size handed to the session
    viewport: Option<egui::Vec2>,

    /// Directory to open on the first frame
    pending_directory: Option<PathBuf>,

    /// Message shown in the status bar
    status: String,
}

impl KpLabelApp {
    /// Create a new application instance.
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: Session::new(&config),
            image_texture: None,
            texture_path: None,
            gallery: Gallery::new(config.thumbnail_size),
            viewport: None,
            pending_directory: config.initial_directory.clone(),
            status: "Ready".to_string(),
            config,
        }
    }

    /// Log a failed operation and show it in the status bar.
    fn report<T>(&mut self, what: &str, result: crate::error::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::error!("{} failed: {}", what, e);
                self.status = format!("{} failed: {}", what, e);
                None
            }
        }
    }

    fn open_directory(&mut self, dir: &Path, ctx: &egui::Context) {
        let result = self.session.open_directory(dir);
        let opened = self.report("Open directory", result);

        // A failed open may still have switched directories
        if !self.gallery.is_built_for(self.session.navigator().paths()) {
            self.gallery.rebuild(ctx, self.session.navigator().paths());
        }
        if let Some(count) = opened {
            self.status = format!("Opened {} ({} images)", dir.display(), count);
        }
    }

    fn select_directory(&mut self, ctx: &egui::Context) {
        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
            self.open_directory(&dir, ctx);
        }
    }

    fn next_image(&mut self) {
        let result = self.session.advance();
        self.report("Next image", result);
    }

    fn previous_image(&mut self) {
        let result = self.session.retreat();
        self.report("Previous image", result);
    }

    fn jump_to(&mut self, path: &Path) {
        let result = self.session.jump_to(path);
        self.report("Open image", result);
    }

    fn save_annotations(&mut self) {
        let result = self.session.save();
        match self.report("Save", result) {
            Some(true) => self.status = "Annotations saved".to_string(),
            Some(false) => self.status = "Nothing to save".to_string(),
            None => {}
        }
    }

    fn reset_image(&mut self) {
        let result = self.session.reset();
        if self.report("Reset", result).is_some() {
            self.status = "Annotations cleared".to_string();
        }
    }

    fn toggle_auto_box(&mut self) {
        let enabled = self.session.toggle_auto_box();
        log::info!("Auto box {}", if enabled { "enabled" } else { "disabled" });
    }

    fn export_preferences(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Preferences", &["yaml", "yml", "json"])
            .set_file_name("kplabel.yaml")
            .save_file()
        {
            let mut config = self.config.clone();
            config.auto_box = self.session.auto_box_enabled();
            let result = serialization::export_config(&config, &path);
            if self.report("Export preferences", result).is_some() {
                log::info!("Exported preferences to {}", path.display());
                self.status = format!("Preferences written to {}", path.display());
            }
        }
    }

    /// Recreate the image texture when the active image changed.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let current = self.session.current_path().map(Path::to_path_buf);
        if current == self.texture_path {
            return;
        }

        self.image_texture = None;
        self.texture_path = current.clone();
        let Some(path) = current else {
            return;
        };

        let result = media::load_image(&path);
        if let Some(loaded) = self.report("Load image", result) {
            let size = [loaded.width as usize, loaded.height as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
            self.image_texture = Some(ctx.load_texture(
                "current_image",
                color_image,
                egui::TextureOptions::LINEAR,
            ));
        }
    }

    /// Handle keyboard shortcuts.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let pressed = |key: egui::Key| ctx.input(|i| i.key_pressed(key));

        if pressed(egui::Key::O) {
            self.select_directory(ctx);
        }
        if pressed(egui::Key::A) || pressed(egui::Key::ArrowLeft) {
            self.previous_image();
        }
        if pressed(egui::Key::D) || pressed(egui::Key::ArrowRight) {
            self.next_image();
        }
        if pressed(egui::Key::R) {
            self.reset_image();
        }
        if pressed(egui::Key::S) {
            self.save_annotations();
        }
        if pressed(egui::Key::Z) {
            self.session.set_mode(Mode::Point);
        }
        if pressed(egui::Key::X) {
            self.session.set_mode(Mode::Box);
        }
        if pressed(egui::Key::B) {
            self.toggle_auto_box();
        }
    }
}

impl eframe::App for KpLabelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(dir) = self.pending_directory.take() {
            self.open_directory(&dir, ctx);
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Directory... (o)").clicked() {
                        self.select_directory(ctx);
                        ui.close_menu();
                    }
                    if ui.button("Save Annotations (s)").clicked() {
                        self.save_annotations();
                        ui.close_menu();
                    }
                    if ui.button("Reset Image (r)").clicked() {
                        self.reset_image();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Export Preferences...").clicked() {
                        self.export_preferences();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &self.session))
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::SetMode(mode) => self.session.set_mode(mode),
            toolbar::ToolbarAction::ToggleAutoBox => self.toggle_auto_box(),
            toolbar::ToolbarAction::Previous => self.previous_image(),
            toolbar::ToolbarAction::Next => self.next_image(),
            toolbar::ToolbarAction::None => {}
        }

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.as_str());
                if let Some(path) = self.session.current_path() {
                    ui.separator();
                    ui.label(path.display().to_string());
                    ui.separator();
                    let state = self.session.state();
                    ui.label(format!(
                        "{} keypoints, {}, {} actions",
                        state.keypoints().len(),
                        if state.bounding_box().is_some() { "box" } else { "no box" },
                        state.actions().len()
                    ));
                    ui.separator();
                    ui.label(format!("Saving to {}", self.session.save_directory().display()));
                }
            });
        });

        // Gallery (right side)
        let selected = egui::SidePanel::right("gallery")
            .default_width(150.0)
            .show(ctx, |ui| self.gallery.show(ui, self.session.current_path()))
            .inner;

        if let Some(path) = selected {
            self.jump_to(&path);
        }

        self.handle_keys(ctx);

        // Main canvas (center)
        self.sync_texture(ctx);
        let (canvas_action, canvas_size) = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::show(ui, &self.session, &self.image_texture))
            .inner;

        if self.viewport != Some(canvas_size) && canvas_size.x > 0.0 && canvas_size.y > 0.0 {
            self.viewport = Some(canvas_size);
            let result = self
                .session
                .set_viewport(canvas_size.x as f64, canvas_size.y as f64);
            self.report("Resize", result);
        }

        match canvas_action {
            canvas::CanvasAction::Click(x, y) => {
                let result = self.session.click(x, y);
                self.report("Click", result);
            }
            canvas::CanvasAction::None => {}
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let result = self.session.save();
        self.report("Save on exit", result);
    }
}
