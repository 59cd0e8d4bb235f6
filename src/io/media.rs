// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file discovery and loading.
//!
//! This module scans directories for labelable images, reads their
//! dimensions, and decodes them to RGBA pixels for display in egui.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// File extensions accepted by the directory scan.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Decoded image ready to upload as a texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// True when the path has one of the accepted image extensions.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}

/// List the images directly inside `dir`, sorted by path.
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    log::info!("Found {} images in {}", paths.len(), dir.display());
    Ok(paths)
}

/// Read the pixel dimensions without decoding the whole image.
pub fn image_dimensions(path: &Path) -> Result<(u32, u32)> {
    Ok(image::image_dimensions(path)?)
}

/// Decode an image to RGBA8.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let rgba = image::open(path)?.to_rgba8();
    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Decode an image scaled down to fit a `max_size` square.
pub fn load_thumbnail(path: &Path, max_size: u32) -> Result<LoadedImage> {
    let rgba = image::open(path)?.thumbnail(max_size, max_size).to_rgba8();
    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbImage::new(width, height).save(path).unwrap();
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("a.jpg")));
        assert!(is_image_file(Path::new("a.JPEG")));
        assert!(is_image_file(Path::new("dir/a.png")));
        assert!(!is_image_file(Path::new("a.txt")));
        assert!(!is_image_file(Path::new("png")));
        assert!(!is_image_file(Path::new("a.bmp")));
    }

    #[test]
    fn test_scan_directory_filters_and_sorts() {
        let dir = tempdir().unwrap();
        write_png(&dir.path().join("b.png"), 4, 4);
        write_png(&dir.path().join("a.png"), 4, 4);
        std::fs::write(dir.path().join("a.txt"), "0 0.5 0.5 0.1 0.1").unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let paths = scan_directory(dir.path()).unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("a.png"), dir.path().join("b.png")]
        );
    }

    #[test]
    fn test_dimensions_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.png");
        write_png(&path, 200, 100);

        assert_eq!(image_dimensions(&path).unwrap(), (200, 100));

        let loaded = load_image(&path).unwrap();
        assert_eq!((loaded.width, loaded.height), (200, 100));
        assert_eq!(loaded.pixels.len(), 200 * 100 * 4);
    }

    #[test]
    fn test_thumbnail_fits_bounds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.png");
        write_png(&path, 400, 100);

        let thumb = load_thumbnail(&path, 100).unwrap();
        assert_eq!(thumb.width, 100);
        assert!(thumb.height <= 100);
    }

    #[test]
    fn test_missing_image_is_error() {
        let dir = tempdir().unwrap();
        assert!(image_dimensions(&dir.path().join("missing.png")).is_err());
    }
}
