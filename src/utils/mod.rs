//! Utility functions for image preparation
//!
//! This module provides helpers that run before the decode engine:
//! - Grayscale conversion (Gray/RGB/BGR/RGBA/BGRA to luminance)
//! - Upscaling (linear resize, clamped to a maximum side)

pub mod grayscale;
pub mod resize;
