// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the annotation core.

use thiserror::Error;

/// Errors raised by coordinate mapping, annotation state, storage and config.
#[derive(Error, Debug)]
pub enum LabelError {
    /// I/O error while reading or writing annotation or config files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or probing failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// A scaling factor was requested against a zero-sized viewport or image
    #[error("Division by zero: image {image_width}x{image_height}, viewport {viewport_width}x{viewport_height}")]
    DivisionByZero {
        image_width: u32,
        image_height: u32,
        viewport_width: f64,
        viewport_height: f64,
    },

    /// The second box corner arrived without a first one
    #[error("Cannot complete a bounding box that was never started")]
    BoxNotStarted,

    /// An operation needs a loaded image but none is active
    #[error("No image loaded")]
    NoImageLoaded,

    /// Configuration file could not be parsed
    #[error("Config error: {message}")]
    Config {
        /// Description of the parse failure
        message: String,
    },
}

impl LabelError {
    /// Create a config error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result alias used by the annotation core.
pub type Result<T> = std::result::Result<T, LabelError>;
