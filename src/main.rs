// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! KPLabel - keypoint and bounding box labeling tool
//!
//! A desktop application for walking through a directory of images and
//! marking one bounding box and a set of keypoints per image. Annotations
//! are stored as one normalized text file per image.

mod app;
mod config;
mod error;
mod io;
mod models;
mod session;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::KpLabelApp;
use config::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load preferences")?;

    // Initialize logging, RUST_LOG overrides the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_filter()),
    )
    .init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 600.0])
            .with_title("KPLabel - Image Keypoint Labeling"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "KPLabel",
        options,
        Box::new(|_cc| Ok(Box::new(KpLabelApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
