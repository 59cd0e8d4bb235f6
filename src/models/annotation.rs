// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the per-image annotation record: an optional
//! bounding box and an ordered list of keypoints, all in original image
//! pixel space.

/// A 2D point in original image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box stored as two opposite corners in click order.
///
/// The corners are not required to be sorted; use [`BoundingBox::min`] and
/// [`BoundingBox::max`] when an ordered form is needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub corner1: Point,
    pub corner2: Point,
}

impl BoundingBox {
    /// Create a box from two corners.
    pub fn new(corner1: Point, corner2: Point) -> Self {
        Self { corner1, corner2 }
    }

    /// Top-left corner.
    pub fn min(&self) -> Point {
        Point::new(
            self.corner1.x.min(self.corner2.x),
            self.corner1.y.min(self.corner2.y),
        )
    }

    /// Bottom-right corner.
    pub fn max(&self) -> Point {
        Point::new(
            self.corner1.x.max(self.corner2.x),
            self.corner1.y.max(self.corner2.y),
        )
    }

    /// Center of the box.
    pub fn center(&self) -> Point {
        Point::new(
            (self.corner1.x + self.corner2.x) / 2.0,
            (self.corner1.y + self.corner2.y) / 2.0,
        )
    }

    /// Width and height of the box.
    pub fn size(&self) -> (f64, f64) {
        (
            (self.corner2.x - self.corner1.x).abs(),
            (self.corner2.y - self.corner1.y).abs(),
        )
    }
}

/// Annotation for a single image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationRecord {
    pub bounding_box: Option<BoundingBox>,
    pub keypoints: Vec<Point>,
}

impl AnnotationRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when there is neither a box nor any keypoint.
    pub fn is_empty(&self) -> bool {
        self.bounding_box.is_none() && self.keypoints.is_empty()
    }
}

/// One entry of the in-memory action log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionLogEntry {
    Point(Point),
    Box(BoundingBox),
}
