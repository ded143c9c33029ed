//! qr_detector - read QR codes from files, byte buffers and pixel arrays
//!
//! A thin facade over a QR decode engine. Images are loaded with the
//! `image` crate, normalised to luminance, enlarged so small symbols are
//! easier to find, and handed to the engine (`rqrr` by default). Each
//! detected symbol comes back as a [`QrResult`] holding the raw payload
//! bytes, which can be rendered in any supported text encoding.
//!
//! ```no_run
//! use qr_detector::QrDetector;
//!
//! let detector = QrDetector::new();
//! let results = detector.read_from_file("label.jpg")?;
//! if let Some(first) = results.first() {
//!     println!("{}", first.decode("shift_jis")?);
//! }
//! # Ok::<(), qr_detector::QrDetectorError>(())
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Detector configuration and environment overrides
pub mod config;
/// The detector facade
pub mod detector;
/// Text encodings for payload bytes
pub mod encoding;
/// Decode engine trait and the bundled engine
pub mod engine;
/// Error type
pub mod error;
/// Core data structures (QrResult, EcLevel, Point)
pub mod models;
/// Dataset helpers for the CLI and benches
pub mod tools;
/// Utility functions (grayscale, resize)
pub mod utils;

pub use config::DetectorConfig;
pub use detector::QrDetector;
pub use encoding::TextEncoding;
pub use engine::DecodeEngine;
pub use error::{QrDetectorError, Result};
pub use models::{EcLevel, Point, QrResult};
pub use utils::grayscale::{PixelArray, PixelLayout};

/// Read every QR symbol in an image file with a default detector
pub fn read_from_file(path: impl AsRef<std::path::Path>) -> Result<Vec<QrResult>> {
    QrDetector::new().read_from_file(path)
}

/// Read every QR symbol in a raw RGB buffer with a default detector
///
/// # Arguments
/// * `image` - Raw RGB bytes (3 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
pub fn detect(image: &[u8], width: usize, height: usize) -> Result<Vec<QrResult>> {
    QrDetector::new().decode_pixels(PixelArray::new(image, width, height, PixelLayout::Rgb)?)
}

/// Read every QR symbol in a grayscale buffer with a default detector
pub fn detect_from_grayscale(image: &[u8], width: usize, height: usize) -> Result<Vec<QrResult>> {
    QrDetector::new().decode_pixels(PixelArray::new(image, width, height, PixelLayout::Gray)?)
}
