// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Normalized text encoding of an annotation record.
//!
//! One record is a single line of whitespace-separated numbers:
//!
//! ```text
//! class cx cy bw bh [kx ky]*
//! ```
//!
//! The box is stored as its center and size and every value is divided by
//! the image width or height. Decoding truncates back to whole pixels, so a
//! round trip may shift each coordinate by at most one pixel.

use crate::models::annotation::{AnnotationRecord, BoundingBox, Point};
use crate::util::geometry::{denormalize_coordinates, normalize_coordinates};

/// Class label written in front of every record.
pub const CLASS_LABEL: u32 = 0;

/// Number of leading tokens describing the class and box.
const HEADER_TOKENS: usize = 5;

/// Encode a record against the image dimensions.
///
/// Returns `None` when the record has no box; such a record is not written.
pub fn encode(record: &AnnotationRecord, width: u32, height: u32) -> Option<String> {
    let bbox = record.bounding_box?;

    let center = bbox.center();
    let (bbox_width, bbox_height) = bbox.size();
    let center = normalize_coordinates(center.x, center.y, width, height);
    let size = normalize_coordinates(bbox_width, bbox_height, width, height);

    let mut tokens = vec![
        CLASS_LABEL.to_string(),
        center.x.to_string(),
        center.y.to_string(),
        size.x.to_string(),
        size.y.to_string(),
    ];
    for keypoint in &record.keypoints {
        let normalized = normalize_coordinates(keypoint.x, keypoint.y, width, height);
        tokens.push(normalized.x.to_string());
        tokens.push(normalized.y.to_string());
    }

    let mut line = tokens.join(" ");
    line.push('\n');
    Some(line)
}

/// Decode a record against the image dimensions.
///
/// Fewer than five numeric tokens yields an empty record. Parsing stops at
/// the first token that is not a number and an unpaired trailing keypoint
/// value is ignored.
pub fn decode(text: &str, width: u32, height: u32) -> AnnotationRecord {
    let mut values = Vec::new();
    for token in text.split_whitespace() {
        match token.parse::<f64>() {
            Ok(value) => values.push(value),
            Err(_) => {
                log::warn!("Ignoring annotation data from non-numeric token {:?}", token);
                break;
            }
        }
    }

    if values.len() < HEADER_TOKENS {
        return AnnotationRecord::new();
    }

    let (center_x, center_y) =
        denormalize_coordinates(&Point::new(values[1], values[2]), width, height);
    let (bbox_width, bbox_height) =
        denormalize_coordinates(&Point::new(values[3], values[4]), width, height);
    let bounding_box = BoundingBox::new(
        Point::new(
            (center_x - bbox_width / 2.0).trunc(),
            (center_y - bbox_height / 2.0).trunc(),
        ),
        Point::new(
            (center_x + bbox_width / 2.0).trunc(),
            (center_y + bbox_height / 2.0).trunc(),
        ),
    );

    let keypoints = values[HEADER_TOKENS..]
        .chunks_exact(2)
        .map(|pair| {
            let (x, y) = denormalize_coordinates(&Point::new(pair[0], pair[1]), width, height);
            Point::new(x.trunc(), y.trunc())
        })
        .collect();

    AnnotationRecord {
        bounding_box: Some(bounding_box),
        keypoints,
    }
}
