// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Thumbnail gallery of the opened directory.
//!
//! The gallery is rebuilt from scratch from the image list whenever a
//! directory is opened. Clicking a thumbnail asks to jump to that image.

use crate::io::media;
use std::path::{Path, PathBuf};

struct GalleryEntry {
    path: PathBuf,
    label: String,
    thumbnail: Option<egui::TextureHandle>,
}

/// Thumbnails for every image in the session.
pub struct Gallery {
    entries: Vec<GalleryEntry>,
    thumbnail_size: u32,
}

impl Gallery {
    pub fn new(thumbnail_size: u32) -> Self {
        Self {
            entries: Vec::new(),
            thumbnail_size,
        }
    }

    /// Whether the entries list exactly `paths`, in order.
    pub fn is_built_for(&self, paths: &[PathBuf]) -> bool {
        self.entries.len() == paths.len()
            && self.entries.iter().zip(paths).all(|(entry, path)| &entry.path == path)
    }

    /// Clear and rebuild the thumbnails for `paths`.
    pub fn rebuild(&mut self, ctx: &egui::Context, paths: &[PathBuf]) {
        self.entries.clear();

        for path in paths {
            let thumbnail = match media::load_thumbnail(path, self.thumbnail_size) {
                Ok(thumb) => {
                    let size = [thumb.width as usize, thumb.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &thumb.pixels);
                    Some(ctx.load_texture(
                        format!("thumb:{}", path.display()),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ))
                }
                Err(e) => {
                    log::error!("Failed to create thumbnail for {}: {}", path.display(), e);
                    None
                }
            };

            let label = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            self.entries.push(GalleryEntry {
                path: path.clone(),
                label,
                thumbnail,
            });
        }

        log::info!("Gallery rebuilt with {} thumbnails", self.entries.len());
    }

    /// Display the gallery. Returns the path of a clicked thumbnail.
    pub fn show(&self, ui: &mut egui::Ui, current: Option<&Path>) -> Option<PathBuf> {
        let mut selected = None;

        ui.heading("Gallery");
        ui.separator();

        if self.entries.is_empty() {
            ui.label(egui::RichText::new("No images").weak());
            return None;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for entry in &self.entries {
                let is_current = current == Some(entry.path.as_path());

                ui.vertical_centered(|ui| {
                    let clicked = match &entry.thumbnail {
                        Some(texture) => ui
                            .add(
                                egui::ImageButton::new(egui::Image::from_texture(
                                    egui::load::SizedTexture::from_handle(texture),
                                ))
                                .selected(is_current),
                            )
                            .clicked(),
                        None => ui.selectable_label(is_current, "(no preview)").clicked(),
                    };
                    if clicked {
                        selected = Some(entry.path.clone());
                    }

                    let label = egui::RichText::new(&entry.label).small();
                    if is_current {
                        ui.label(label.strong());
                    } else {
                        ui.label(label);
                    }
                });
                ui.add_space(5.0);
            }
        });

        selected
    }
}
