// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and annotation.
//!
//! This module draws the active image scaled to the available space,
//! anchored at the top-left corner, with the bounding box, the box being
//! drawn and the keypoints on top. Clicks are reported in display
//! coordinates relative to the image origin.

use crate::models::annotation::Point;
use crate::session::Session;
use crate::util::geometry::CoordinateMapper;

const BOX_COLOR: egui::Color32 = egui::Color32::RED;
const KEYPOINT_COLOR: egui::Color32 = egui::Color32::GREEN;
const KEYPOINT_RADIUS: f32 = 3.0;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// Click in display coordinates relative to the image origin
    Click(f64, f64),
}

/// Display the canvas and report the size it occupies.
pub fn show(
    ui: &mut egui::Ui,
    session: &Session,
    image_texture: &Option<egui::TextureHandle>,
) -> (CanvasAction, egui::Vec2) {
    let mut action = CanvasAction::None;

    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
    let canvas_rect = response.rect;
    painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(40));

    let (Some(texture), Some((img_width, img_height))) = (image_texture, session.image_size())
    else {
        show_placeholder(&painter, canvas_rect, session);
        return (action, canvas_rect.size());
    };

    let mapper = session.mapper();
    let (display_width, display_height) = mapper.display_size(img_width, img_height);
    let image_rect = egui::Rect::from_min_size(
        canvas_rect.min,
        egui::vec2(display_width as f32, display_height as f32),
    );

    painter.image(
        texture.id(),
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    // Clicks outside the image are accepted as-is
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let rel = pos - image_rect.min;
            action = CanvasAction::Click(rel.x as f64, rel.y as f64);
        }
    }

    let state = session.state();
    if let Some(bbox) = state.bounding_box() {
        draw_box(&painter, mapper, image_rect.min, &bbox.min(), &bbox.max());
    }

    if let Some(corner) = state.pending_corner() {
        if let Some(pos) = response.hover_pos() {
            let rel = pos - image_rect.min;
            let hovered = mapper.to_image_space(rel.x as f64, rel.y as f64);
            draw_box(&painter, mapper, image_rect.min, &corner, &hovered);
        }
    }

    for keypoint in state.keypoints() {
        let pos = to_screen(mapper, image_rect.min, keypoint);
        painter.circle_filled(pos, KEYPOINT_RADIUS, KEYPOINT_COLOR);
    }

    (action, canvas_rect.size())
}

fn to_screen(mapper: &CoordinateMapper, origin: egui::Pos2, point: &Point) -> egui::Pos2 {
    let (x, y) = mapper.to_display_space(point);
    origin + egui::vec2(x as f32, y as f32)
}

fn draw_box(
    painter: &egui::Painter,
    mapper: &CoordinateMapper,
    origin: egui::Pos2,
    corner1: &Point,
    corner2: &Point,
) {
    let rect = egui::Rect::from_two_pos(
        to_screen(mapper, origin, corner1),
        to_screen(mapper, origin, corner2),
    );
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, BOX_COLOR));
}

/// Welcome or loading text when there is nothing to draw.
fn show_placeholder(painter: &egui::Painter, rect: egui::Rect, session: &Session) {
    let text = if session.navigator().is_empty() {
        "Open a directory of images to begin labeling (o)"
    } else {
        "Loading image..."
    };
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(16.0),
        egui::Color32::from_gray(180),
    );
}
