// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation state for the active image.
//!
//! Holds the keypoints and bounding box being edited, the two-click box
//! entry state machine, and an action log of everything committed since the
//! image was loaded.

use super::annotation::{ActionLogEntry, AnnotationRecord, BoundingBox, Point};
use crate::error::{LabelError, Result};

/// What a click on the canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Point,
    Box,
}

/// Bounding box entry state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoxState {
    #[default]
    NoBox,
    /// First corner placed. A previously committed box survives until the
    /// second corner arrives.
    PendingFirstCorner {
        corner: Point,
        previous: Option<BoundingBox>,
    },
    Committed(BoundingBox),
}

/// In-memory annotation state for one image.
#[derive(Debug, Clone, Default)]
pub struct AnnotationState {
    keypoints: Vec<Point>,
    box_state: BoxState,
    actions: Vec<ActionLogEntry>,
}

impl AnnotationState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a keypoint. Duplicates are kept.
    pub fn add_keypoint(&mut self, point: Point) {
        self.keypoints.push(point);
        self.actions.push(ActionLogEntry::Point(point));
    }

    /// Place the first corner of a new box.
    pub fn start_box(&mut self, corner: Point) {
        let previous = self.bounding_box();
        self.box_state = BoxState::PendingFirstCorner { corner, previous };
    }

    /// Place the second corner and commit the box, replacing any prior one.
    pub fn complete_box(&mut self, corner: Point) -> Result<BoundingBox> {
        match self.box_state {
            BoxState::PendingFirstCorner { corner: first, .. } => {
                let bbox = BoundingBox::new(first, corner);
                self.set_box(bbox);
                Ok(bbox)
            }
            _ => Err(LabelError::BoxNotStarted),
        }
    }

    /// Advance the box state machine by one click.
    ///
    /// Returns the committed box when this click completed one.
    pub fn click_box(&mut self, corner: Point) -> Option<BoundingBox> {
        match self.box_state {
            BoxState::PendingFirstCorner { corner: first, .. } => {
                let bbox = BoundingBox::new(first, corner);
                self.set_box(bbox);
                Some(bbox)
            }
            BoxState::NoBox | BoxState::Committed(_) => {
                self.start_box(corner);
                None
            }
        }
    }

    /// Commit a box directly, dropping any pending corner.
    pub fn set_box(&mut self, bbox: BoundingBox) {
        self.box_state = BoxState::Committed(bbox);
        self.actions.push(ActionLogEntry::Box(bbox));
    }

    /// Clear keypoints, box, pending corner and the action log.
    pub fn reset(&mut self) {
        self.keypoints.clear();
        self.box_state = BoxState::NoBox;
        self.actions.clear();
    }

    /// Replace the state with a decoded record.
    pub fn load(&mut self, record: AnnotationRecord) {
        self.reset();
        if let Some(bbox) = record.bounding_box {
            self.set_box(bbox);
        }
        for point in record.keypoints {
            self.add_keypoint(point);
        }
    }

    /// Snapshot of the persistable part of the state.
    pub fn record(&self) -> AnnotationRecord {
        AnnotationRecord {
            bounding_box: self.bounding_box(),
            keypoints: self.keypoints.clone(),
        }
    }

    pub fn keypoints(&self) -> &[Point] {
        &self.keypoints
    }

    /// The committed box, if any.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        match self.box_state {
            BoxState::NoBox => None,
            BoxState::PendingFirstCorner { previous, .. } => previous,
            BoxState::Committed(bbox) => Some(bbox),
        }
    }

    /// First corner of a box being drawn.
    pub fn pending_corner(&self) -> Option<Point> {
        match self.box_state {
            BoxState::PendingFirstCorner { corner, .. } => Some(corner),
            _ => None,
        }
    }

    pub fn actions(&self) -> &[ActionLogEntry] {
        &self.actions
    }

    /// True when nothing would be persisted.
    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty() && self.bounding_box().is_none()
    }
}
