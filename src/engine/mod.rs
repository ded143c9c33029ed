//! Decode engine seam
//!
//! The facade never locates or decodes symbols itself. It hands a luminance
//! image to a [`DecodeEngine`] and wraps whatever comes back.

use std::fmt::Debug;
use std::sync::Arc;

use image::GrayImage;

use crate::error::Result;
use crate::models::QrResult;

#[cfg(feature = "rqrr")]
pub mod rqrr_engine;

#[cfg(feature = "rqrr")]
pub use rqrr_engine::RqrrEngine;

/// Something that finds and decodes QR symbols in a luminance image
pub trait DecodeEngine: Send + Sync + Debug {
    /// Short engine name for logs
    fn name(&self) -> &'static str;

    /// Detect and decode every symbol in `image`
    ///
    /// Corner points are in `image` coordinates. An image with no readable
    /// symbol yields an empty vector, not an error.
    fn detect(&self, image: &GrayImage) -> Result<Vec<QrResult>>;
}

/// The engine compiled into this build, if any
pub fn default_engine() -> Option<Arc<dyn DecodeEngine>> {
    #[cfg(feature = "rqrr")]
    {
        Some(Arc::new(RqrrEngine::new()))
    }

    #[cfg(not(feature = "rqrr"))]
    {
        None
    }
}
