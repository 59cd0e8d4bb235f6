// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation files on disk.
//!
//! Each image `name.ext` owns `{save_directory}/name.txt`. Files are written
//! whole, without a temporary file or rename.

use super::codec;
use crate::error::Result;
use crate::models::annotation::AnnotationRecord;
use std::path::{Path, PathBuf};

/// Reads, writes and deletes per-image annotation files.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    save_directory: PathBuf,
}

impl AnnotationStore {
    pub fn new(save_directory: impl Into<PathBuf>) -> Self {
        Self {
            save_directory: save_directory.into(),
        }
    }

    pub fn save_directory(&self) -> &Path {
        &self.save_directory
    }

    pub fn set_save_directory(&mut self, save_directory: impl Into<PathBuf>) {
        self.save_directory = save_directory.into();
    }

    /// Annotation file path for an image, matched by file stem.
    pub fn annotation_path(&self, image_path: &Path) -> PathBuf {
        let stem = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.save_directory.join(format!("{}.txt", stem))
    }

    /// Write the record for an image.
    ///
    /// Returns `false` without touching the disk when the record has no box.
    pub fn save(
        &self,
        image_path: &Path,
        record: &AnnotationRecord,
        width: u32,
        height: u32,
    ) -> Result<bool> {
        let Some(line) = codec::encode(record, width, height) else {
            return Ok(false);
        };

        let path = self.annotation_path(image_path);
        std::fs::write(&path, line)?;
        log::info!(
            "Saved {} keypoints to {}",
            record.keypoints.len(),
            path.display()
        );
        Ok(true)
    }

    /// Read the record for an image, or an empty one if no file exists.
    pub fn load(&self, image_path: &Path, width: u32, height: u32) -> Result<AnnotationRecord> {
        let path = self.annotation_path(image_path);
        if !path.exists() {
            return Ok(AnnotationRecord::new());
        }

        let bytes = std::fs::read(&path)?;
        let text = String::from_utf8_lossy(&bytes);
        if std::str::from_utf8(&bytes).is_err() {
            log::warn!("{} is not valid UTF-8", path.display());
        }
        let record = codec::decode(&text, width, height);
        if record.is_empty() {
            log::warn!("{} holds no usable annotation", path.display());
            return Ok(record);
        }
        log::info!(
            "Loaded {} keypoints from {}",
            record.keypoints.len(),
            path.display()
        );
        Ok(record)
    }

    /// Delete the record for an image. Returns whether a file was removed.
    pub fn delete(&self, image_path: &Path) -> Result<bool> {
        let path = self.annotation_path(image_path);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        log::info!("Deleted {}", path.display());
        Ok(true)
    }
}
