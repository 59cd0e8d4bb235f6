// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Labeling session controller.
//!
//! The session owns everything that changes while labeling: the image list
//! and position, the annotation state of the active image, the display
//! mapping and the click mode. The GUI forwards user input here and reads
//! back what to draw.
//!
//! The active image is saved whenever it is left, whichever way
//! (next, previous, gallery jump or opening another directory). A save with
//! keypoints but no box first derives the box from the keypoints.

use crate::config::AppConfig;
use crate::error::{LabelError, Result};
use crate::io::{media, store::AnnotationStore};
use crate::models::{
    navigator::Navigator,
    state::{AnnotationState, Mode},
};
use crate::util::geometry::{auto_box, CoordinateMapper};
use std::path::{Path, PathBuf};

/// State of one labeling session.
pub struct Session {
    navigator: Navigator,
    state: AnnotationState,
    mapper: CoordinateMapper,
    store: AnnotationStore,
    /// Save directory forced by the preferences
    save_override: Option<PathBuf>,
    mode: Mode,
    auto_box: bool,
    viewport: Option<(f64, f64)>,
    image_size: Option<(u32, u32)>,
}

impl Session {
    /// Create an empty session from the preferences.
    pub fn new(config: &AppConfig) -> Self {
        let save_directory = config
            .save_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            navigator: Navigator::default(),
            state: AnnotationState::new(),
            mapper: CoordinateMapper::new(),
            store: AnnotationStore::new(save_directory),
            save_override: config.save_directory.clone(),
            mode: Mode::default(),
            auto_box: config.auto_box,
            viewport: None,
            image_size: None,
        }
    }

    /// Scan a directory and start labeling its first image.
    ///
    /// Annotations are written next to the images unless the preferences
    /// name a save directory. Returns the number of images found. If the
    /// first image cannot be read the session keeps its previous directory.
    pub fn open_directory(&mut self, dir: &Path) -> Result<usize> {
        let paths = media::scan_directory(dir)?;
        let dimensions = match paths.first() {
            Some(first) => Some(media::image_dimensions(first)?),
            None => None,
        };
        self.save()?;

        if self.save_override.is_none() {
            self.store.set_save_directory(dir);
        }
        self.navigator = Navigator::new(paths);
        match dimensions {
            Some(dimensions) => self.load_current(dimensions)?,
            None => {
                self.state.reset();
                self.image_size = None;
            }
        }
        Ok(self.navigator.len())
    }

    /// Save and move to the next image. At the last image nothing happens.
    pub fn advance(&mut self) -> Result<bool> {
        if !self.navigator.has_next() {
            return Ok(false);
        }
        let dimensions = self.dimensions_at(self.navigator.index() + 1)?;
        self.save()?;
        self.navigator.advance();
        self.load_current(dimensions)?;
        Ok(true)
    }

    /// Save and move to the previous image. At the first image nothing happens.
    pub fn retreat(&mut self) -> Result<bool> {
        if !self.navigator.has_previous() {
            return Ok(false);
        }
        let dimensions = self.dimensions_at(self.navigator.index() - 1)?;
        self.save()?;
        self.navigator.retreat();
        self.load_current(dimensions)?;
        Ok(true)
    }

    /// Save and switch to `path`. Paths outside the list are ignored.
    pub fn jump_to(&mut self, path: &Path) -> Result<bool> {
        let Some(index) = self.navigator.paths().iter().position(|p| p == path) else {
            log::warn!("Ignoring jump to unknown image {}", path.display());
            return Ok(false);
        };
        let dimensions = self.dimensions_at(index)?;
        self.save()?;
        self.navigator.jump_to(path);
        self.load_current(dimensions)?;
        Ok(true)
    }

    /// Persist the active image's annotation.
    ///
    /// Derives the box from the keypoints when none was drawn. Returns
    /// whether a file was written; an empty state writes nothing.
    pub fn save(&mut self) -> Result<bool> {
        if self.state.is_empty() {
            return Ok(false);
        }
        let (Some(path), Some((width, height))) = (
            self.navigator.current().map(Path::to_path_buf),
            self.image_size,
        ) else {
            return Err(LabelError::NoImageLoaded);
        };

        if self.state.bounding_box().is_none() {
            self.apply_auto_box();
        }
        self.store.save(&path, &self.state.record(), width, height)
    }

    /// Clear the active image's annotation and delete its file.
    pub fn reset(&mut self) -> Result<()> {
        self.state.reset();
        if let Some(path) = self.navigator.current() {
            self.store.delete(path)?;
            log::info!("Reset annotations for {}", path.display());
        }
        Ok(())
    }

    /// Handle a click at display coordinates relative to the image origin.
    pub fn click(&mut self, display_x: f64, display_y: f64) -> Result<()> {
        if self.image_size.is_none() {
            return Err(LabelError::NoImageLoaded);
        }
        let point = self.mapper.to_image_space(display_x, display_y);
        log::debug!("Click at ({}, {}) in {:?} mode", point.x, point.y, self.mode);

        match self.mode {
            Mode::Point => {
                self.state.add_keypoint(point);
                if self.auto_box {
                    self.apply_auto_box();
                }
            }
            Mode::Box => {
                self.state.click_box(point);
            }
        }
        Ok(())
    }

    /// Replace the box with the keypoint envelope, if there are keypoints.
    fn apply_auto_box(&mut self) {
        if let Some(bbox) = auto_box(self.state.keypoints()) {
            self.state.set_box(bbox);
        }
    }

    /// Record a new display area size and rescale the active image.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Result<()> {
        if let Some((image_width, image_height)) = self.image_size {
            self.mapper
                .recompute(image_width, image_height, width, height)?;
        }
        self.viewport = Some((width, height));
        Ok(())
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Flip the auto-box toggle and return the new value.
    pub fn toggle_auto_box(&mut self) -> bool {
        self.auto_box = !self.auto_box;
        self.auto_box
    }

    pub fn auto_box_enabled(&self) -> bool {
        self.auto_box
    }

    pub fn state(&self) -> &AnnotationState {
        &self.state
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.navigator.current()
    }

    /// Pixel dimensions of the active image.
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    pub fn save_directory(&self) -> &Path {
        self.store.save_directory()
    }

    /// Dimensions of the image at `index`, read before leaving the active one.
    fn dimensions_at(&self, index: usize) -> Result<(u32, u32)> {
        match self.navigator.paths().get(index) {
            Some(path) => media::image_dimensions(path),
            None => Err(LabelError::NoImageLoaded),
        }
    }

    /// Make the navigator's current image active.
    ///
    /// The image stays usable even when its record cannot be read; the
    /// read error is still returned.
    fn load_current(&mut self, (width, height): (u32, u32)) -> Result<()> {
        self.state.reset();
        self.image_size = Some((width, height));
        if let Some((viewport_width, viewport_height)) = self.viewport {
            self.mapper
                .recompute(width, height, viewport_width, viewport_height)?;
        }

        let Some(path) = self.navigator.current() else {
            return Ok(());
        };
        let record = self.store.load(path, width, height)?;
        self.state.load(record);
        log::info!(
            "Loaded image {}/{}: {} ({}x{})",
            self.navigator.index() + 1,
            self.navigator.len(),
            path.display(),
            width,
            height
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::{BoundingBox, Point};
    use tempfile::{tempdir, TempDir};

    /// Directory with three 200x100 images.
    fn image_dir() -> TempDir {
        let dir = tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            image::RgbImage::new(200, 100)
                .save(dir.path().join(name))
                .unwrap();
        }
        dir
    }

    /// Session over `dir` with a 400x400 viewport (scaling factor 2).
    fn session(dir: &Path) -> Session {
        let mut session = Session::new(&AppConfig::default());
        session.set_viewport(400.0, 400.0).unwrap();
        assert_eq!(session.open_directory(dir).unwrap(), 3);
        session
    }

    #[test]
    fn test_open_directory_loads_first_image() {
        let dir = image_dir();
        let session = session(dir.path());

        assert_eq!(session.current_path(), Some(dir.path().join("a.png").as_path()));
        assert_eq!(session.image_size(), Some((200, 100)));
        assert_eq!(session.mapper().scaling_factor(), 2.0);
        assert_eq!(session.save_directory(), dir.path());
    }

    #[test]
    fn test_click_maps_display_to_image_space() {
        let dir = image_dir();
        let mut session = session(dir.path());

        session.click(21.0, 41.0).unwrap();
        assert_eq!(session.state().keypoints(), &[Point::new(10.0, 20.0)]);

        session.set_mode(Mode::Box);
        session.click(0.0, 0.0).unwrap();
        assert_eq!(session.state().pending_corner(), Some(Point::new(0.0, 0.0)));
        session.click(100.0, 60.0).unwrap();
        assert_eq!(
            session.state().bounding_box(),
            Some(BoundingBox::new(Point::new(0.0, 0.0), Point::new(50.0, 30.0)))
        );
    }

    #[test]
    fn test_advance_auto_boxes_and_saves() {
        let dir = image_dir();
        let mut session = session(dir.path());

        session.click(20.0, 20.0).unwrap();
        session.click(380.0, 180.0).unwrap();
        assert!(session.advance().unwrap());

        let text = std::fs::read_to_string(dir.path().join("a.txt")).unwrap();
        assert_eq!(text.trim_end(), "0 0.5 0.5 0.9 0.8 0.05 0.1 0.95 0.9");
        assert_eq!(session.navigator().index(), 1);
        assert!(session.state().is_empty());
        assert!(session.state().actions().is_empty());
    }

    #[test]
    fn test_advance_past_last_is_noop() {
        let dir = image_dir();
        let mut session = session(dir.path());
        session.advance().unwrap();
        session.advance().unwrap();

        session.click(10.0, 10.0).unwrap();
        assert!(!session.advance().unwrap());

        assert_eq!(session.navigator().index(), 2);
        assert_eq!(session.state().keypoints().len(), 1);
        assert!(!dir.path().join("c.txt").exists());
    }

    #[test]
    fn test_retreat_and_jump_save_on_leave() {
        let dir = image_dir();
        let mut session = session(dir.path());

        session.advance().unwrap();
        session.click(40.0, 40.0).unwrap();
        assert!(session.retreat().unwrap());
        assert!(dir.path().join("b.txt").exists());

        session.click(60.0, 60.0).unwrap();
        assert!(session.jump_to(&dir.path().join("c.png")).unwrap());
        assert!(dir.path().join("a.txt").exists());
        assert_eq!(session.navigator().index(), 2);

        assert!(!session.jump_to(&dir.path().join("zzz.png")).unwrap());
        assert_eq!(session.navigator().index(), 2);
    }

    #[test]
    fn test_revisit_restores_annotation() {
        let dir = image_dir();
        let mut session = session(dir.path());

        session.click(20.0, 20.0).unwrap();
        session.click(380.0, 180.0).unwrap();
        session.advance().unwrap();
        session.retreat().unwrap();

        let state = session.state();
        assert_eq!(
            state.bounding_box(),
            Some(BoundingBox::new(Point::new(10.0, 10.0), Point::new(190.0, 90.0)))
        );
        assert_eq!(
            state.keypoints(),
            &[Point::new(10.0, 10.0), Point::new(190.0, 90.0)]
        );
        assert_eq!(state.actions().len(), 3);
    }

    #[test]
    fn test_empty_save_writes_nothing() {
        let dir = image_dir();
        let mut session = session(dir.path());

        assert!(!session.save().unwrap());
        session.advance().unwrap();
        assert!(!dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_reset_deletes_record() {
        let dir = image_dir();
        let mut session = session(dir.path());

        session.click(20.0, 20.0).unwrap();
        assert!(session.save().unwrap());
        assert!(dir.path().join("a.txt").exists());

        session.reset().unwrap();
        assert!(!dir.path().join("a.txt").exists());
        assert!(session.state().is_empty());
        assert!(session.state().actions().is_empty());
    }

    #[test]
    fn test_manual_box_is_kept_on_save() {
        let dir = image_dir();
        let mut session = session(dir.path());

        session.click(100.0, 100.0).unwrap();
        session.set_mode(Mode::Box);
        session.click(0.0, 0.0).unwrap();
        session.click(400.0, 200.0).unwrap();
        session.save().unwrap();

        let text = std::fs::read_to_string(dir.path().join("a.txt")).unwrap();
        assert!(text.starts_with("0 0.5 0.5 1 1 "));
    }

    #[test]
    fn test_auto_box_toggle_tracks_keypoints() {
        let dir = image_dir();
        let mut session = session(dir.path());
        assert!(session.toggle_auto_box());

        session.click(20.0, 20.0).unwrap();
        session.click(100.0, 60.0).unwrap();
        assert_eq!(
            session.state().bounding_box(),
            Some(BoundingBox::new(Point::new(10.0, 10.0), Point::new(50.0, 30.0)))
        );
    }

    #[test]
    fn test_viewport_resize_rescales() {
        let dir = image_dir();
        let mut session = session(dir.path());

        session.set_viewport(100.0, 100.0).unwrap();
        assert_eq!(session.mapper().scaling_factor(), 0.5);

        assert!(session.set_viewport(0.0, 100.0).is_err());
        assert_eq!(session.mapper().scaling_factor(), 0.5);
    }

    #[test]
    fn test_click_without_image_fails() {
        let mut session = Session::new(&AppConfig::default());
        assert!(matches!(session.click(1.0, 1.0), Err(LabelError::NoImageLoaded)));
        assert!(!session.save().unwrap());
    }

    #[test]
    fn test_save_directory_override() {
        let dir = image_dir();
        let labels = tempdir().unwrap();
        let config = AppConfig {
            save_directory: Some(labels.path().to_path_buf()),
            ..AppConfig::default()
        };

        let mut session = Session::new(&config);
        session.set_viewport(400.0, 400.0).unwrap();
        session.open_directory(dir.path()).unwrap();
        session.click(20.0, 20.0).unwrap();
        session.advance().unwrap();

        assert!(labels.path().join("a.txt").exists());
        assert!(!dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_invalid_utf8_record_keeps_image_usable() {
        let dir = image_dir();
        std::fs::write(dir.path().join("a.txt"), [0x30, 0x20, 0xff, 0xfe]).unwrap();

        let mut session = session(dir.path());
        assert!(session.state().is_empty());
        assert_eq!(session.image_size(), Some((200, 100)));

        session.click(20.0, 20.0).unwrap();
        assert_eq!(session.state().keypoints(), &[Point::new(10.0, 10.0)]);
    }

    #[test]
    fn test_unreadable_record_keeps_image_usable() {
        let dir = image_dir();
        std::fs::create_dir(dir.path().join("a.txt")).unwrap();

        let mut session = Session::new(&AppConfig::default());
        session.set_viewport(400.0, 400.0).unwrap();
        let result = session.open_directory(dir.path());
        assert!(matches!(result, Err(LabelError::Io(_))));

        assert_eq!(session.navigator().len(), 3);
        assert_eq!(session.current_path(), Some(dir.path().join("a.png").as_path()));
        assert_eq!(session.image_size(), Some((200, 100)));
        session.click(20.0, 20.0).unwrap();
        assert_eq!(session.state().keypoints().len(), 1);
    }

    #[test]
    fn test_open_corrupt_directory_keeps_session() {
        let dir = image_dir();
        let broken = tempdir().unwrap();
        std::fs::write(broken.path().join("broken.png"), b"not an image").unwrap();

        let mut session = session(dir.path());
        session.click(20.0, 20.0).unwrap();

        assert!(session.open_directory(broken.path()).is_err());
        assert_eq!(session.navigator().len(), 3);
        assert_eq!(session.current_path(), Some(dir.path().join("a.png").as_path()));
        assert_eq!(session.save_directory(), dir.path());
        assert_eq!(session.image_size(), Some((200, 100)));
        assert_eq!(session.state().keypoints().len(), 1);
        assert!(!dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_advance_into_corrupt_image_stays_put() {
        let dir = tempdir().unwrap();
        image::RgbImage::new(200, 100)
            .save(dir.path().join("a.png"))
            .unwrap();
        std::fs::write(dir.path().join("b.png"), b"not an image").unwrap();

        let mut session = Session::new(&AppConfig::default());
        session.set_viewport(400.0, 400.0).unwrap();
        assert_eq!(session.open_directory(dir.path()).unwrap(), 2);
        session.click(20.0, 20.0).unwrap();

        assert!(matches!(session.advance(), Err(LabelError::Image(_))));
        assert_eq!(session.navigator().index(), 0);
        assert_eq!(session.state().keypoints().len(), 1);
        assert!(!dir.path().join("a.txt").exists());

        let b = dir.path().join("b.png");
        assert!(session.jump_to(&b).is_err());
        assert_eq!(session.navigator().index(), 0);
    }
}
