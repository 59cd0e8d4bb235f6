// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides coordinate transformations between image pixel
//! space, normalized space and the scaled display space, plus the
//! keypoint envelope used to derive a box automatically.

use crate::error::{LabelError, Result};
use crate::models::annotation::{BoundingBox, Point};

/// Convert pixel coordinates to normalized coordinates (0.0 to 1.0).
pub fn normalize_coordinates(pixel_x: f64, pixel_y: f64, width: u32, height: u32) -> Point {
    Point {
        x: pixel_x / width as f64,
        y: pixel_y / height as f64,
    }
}

/// Convert normalized coordinates to pixel coordinates.
pub fn denormalize_coordinates(point: &Point, width: u32, height: u32) -> (f64, f64) {
    (point.x * width as f64, point.y * height as f64)
}

/// Tight axis-aligned envelope of the keypoints, `None` when there are none.
pub fn auto_box(keypoints: &[Point]) -> Option<BoundingBox> {
    let first = keypoints.first()?;
    let (min, max) = keypoints.iter().skip(1).fold((*first, *first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });
    Some(BoundingBox::new(min, max))
}

/// Maps between original image pixels and the scaled display.
///
/// The image is scaled uniformly by one factor so it fits the viewport with
/// its aspect ratio preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    scaling_factor: f64,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self { scaling_factor: 1.0 }
    }
}

impl CoordinateMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scaling_factor(&self) -> f64 {
        self.scaling_factor
    }

    /// Recompute the factor as the largest scale fitting the image inside
    /// the viewport on both axes.
    ///
    /// Fails without touching the current factor when any dimension is not
    /// positive.
    pub fn recompute(
        &mut self,
        image_width: u32,
        image_height: u32,
        viewport_width: f64,
        viewport_height: f64,
    ) -> Result<f64> {
        if image_width == 0
            || image_height == 0
            || !(viewport_width > 0.0)
            || !(viewport_height > 0.0)
        {
            return Err(LabelError::DivisionByZero {
                image_width,
                image_height,
                viewport_width,
                viewport_height,
            });
        }

        self.scaling_factor = (viewport_width / image_width as f64)
            .min(viewport_height / image_height as f64);
        log::debug!(
            "Scaling factor {:.4} for {}x{} in {:.0}x{:.0}",
            self.scaling_factor,
            image_width,
            image_height,
            viewport_width,
            viewport_height
        );
        Ok(self.scaling_factor)
    }

    /// Convert a display position to whole image pixels.
    pub fn to_image_space(&self, display_x: f64, display_y: f64) -> Point {
        Point::new(
            (display_x / self.scaling_factor).floor(),
            (display_y / self.scaling_factor).floor(),
        )
    }

    /// Convert an image position to display coordinates.
    pub fn to_display_space(&self, point: &Point) -> (f64, f64) {
        (point.x * self.scaling_factor, point.y * self.scaling_factor)
    }

    /// Size of the image once scaled for display.
    pub fn display_size(&self, image_width: u32, image_height: u32) -> (f64, f64) {
        (
            image_width as f64 * self.scaling_factor,
            image_height as f64 * self.scaling_factor,
        )
    }
}
