// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Position within the list of images being labeled.

use std::path::{Path, PathBuf};

/// Ordered image paths plus the index of the active one.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    paths: Vec<PathBuf>,
    index: usize,
}

impl Navigator {
    /// Create a navigator positioned on the first path.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths, index: 0 }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Path of the active image.
    pub fn current(&self) -> Option<&Path> {
        self.paths.get(self.index).map(PathBuf::as_path)
    }

    /// True when a following image exists.
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.paths.len()
    }

    /// True when a preceding image exists.
    pub fn has_previous(&self) -> bool {
        self.index > 0 && !self.paths.is_empty()
    }

    /// Move to the next image. Returns `None` and stays put at the end.
    pub fn advance(&mut self) -> Option<&Path> {
        if !self.has_next() {
            return None;
        }
        self.index += 1;
        self.current()
    }

    /// Move to the previous image. Returns `None` and stays put at the start.
    pub fn retreat(&mut self) -> Option<&Path> {
        if !self.has_previous() {
            return None;
        }
        self.index -= 1;
        self.current()
    }

    /// Move to the given path. Returns `None` if it is not in the list.
    pub fn jump_to(&mut self, path: &Path) -> Option<&Path> {
        let index = self.paths.iter().position(|p| p == path)?;
        self.index = index;
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator() -> Navigator {
        Navigator::new(vec![
            PathBuf::from("a.jpg"),
            PathBuf::from("b.png"),
            PathBuf::from("c.jpeg"),
        ])
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut nav = navigator();
        assert_eq!(nav.advance(), Some(Path::new("b.png")));
        assert_eq!(nav.advance(), Some(Path::new("c.jpeg")));
        assert_eq!(nav.advance(), None);
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn test_retreat_stops_at_start() {
        let mut nav = navigator();
        assert_eq!(nav.retreat(), None);
        assert_eq!(nav.index(), 0);

        nav.advance();
        assert_eq!(nav.retreat(), Some(Path::new("a.jpg")));
    }

    #[test]
    fn test_jump_to() {
        let mut nav = navigator();
        assert_eq!(nav.jump_to(Path::new("c.jpeg")), Some(Path::new("c.jpeg")));
        assert_eq!(nav.index(), 2);

        assert_eq!(nav.jump_to(Path::new("missing.png")), None);
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn test_empty_navigator() {
        let mut nav = Navigator::default();
        assert!(nav.is_empty());
        assert_eq!(nav.current(), None);
        assert_eq!(nav.advance(), None);
        assert_eq!(nav.retreat(), None);
    }
}
