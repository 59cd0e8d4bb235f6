// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data model and per-image editing state.

pub mod annotation;
pub mod navigator;
pub mod state;
