//! The detector facade
//!
//! [`QrDetector`] loads an image from a file, an encoded byte buffer or an
//! in-memory pixel array, normalises it to luminance, enlarges it, and hands
//! it to the configured [`DecodeEngine`].

use std::error::Error as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{DynamicImage, GrayImage};
use rayon::prelude::*;
use tokio::runtime::Handle;
use tracing::{debug, error, instrument};

use crate::config::DetectorConfig;
use crate::engine::{self, DecodeEngine};
use crate::error::{QrDetectorError, Result};
use crate::models::QrResult;
use crate::utils::grayscale::PixelArray;
use crate::utils::resize::upscale;

/// Reads QR codes from images
///
/// Cloning is cheap: the engine is shared behind an `Arc`.
///
/// # Example
/// ```no_run
/// use qr_detector::QrDetector;
///
/// let detector = QrDetector::new();
/// for result in detector.read_from_file("ticket.png")? {
///     println!("{}", result.decode("utf-8")?);
/// }
/// # Ok::<(), qr_detector::QrDetectorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct QrDetector {
    config: DetectorConfig,
    engine: Option<Arc<dyn DecodeEngine>>,
}

impl QrDetector {
    /// Create a detector with default settings and the bundled engine
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    /// Create a detector with the bundled engine and a custom configuration
    pub fn with_config(config: DetectorConfig) -> Self {
        Self {
            config,
            engine: engine::default_engine(),
        }
    }

    /// Create a detector that uses `engine`
    pub fn with_engine(config: DetectorConfig, engine: Arc<dyn DecodeEngine>) -> Self {
        Self {
            config,
            engine: Some(engine),
        }
    }

    /// Create a detector with no engine; every detection fails with
    /// [`QrDetectorError::EngineUnavailable`]
    pub fn without_engine(config: DetectorConfig) -> Self {
        Self {
            config,
            engine: None,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Name of the configured engine
    pub fn engine_name(&self) -> Option<&'static str> {
        self.engine.as_ref().map(|e| e.name())
    }

    /// Read every QR symbol in an image file
    ///
    /// Returns an empty vector when the image holds no readable symbol. Very
    /// small symbols may be missed without an error.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn read_from_file(&self, path: impl AsRef<Path>) -> Result<Vec<QrResult>> {
        let result = self.load_file(path.as_ref()).and_then(|img| self.decode_image(&img));
        self.report("read_from_file", result)
    }

    /// Read every QR symbol in an encoded image (PNG, JPEG, ...) held in memory
    ///
    /// When awaited inside a tokio runtime, image decoding and detection run on
    /// the blocking pool so the caller's workers stay free. Under any other
    /// executor the work runs inline on the polling thread. Each call owns its
    /// buffer.
    #[instrument(skip_all, fields(data_len = tracing::field::Empty))]
    pub async fn read_from_bytes(&self, bytes: impl Into<Vec<u8>>) -> Result<Vec<QrResult>> {
        let bytes = bytes.into();
        tracing::Span::current().record("data_len", bytes.len());

        let result = if bytes.is_empty() {
            Err(QrDetectorError::EmptyInput)
        } else if let Ok(handle) = Handle::try_current() {
            let detector = self.clone();
            let span = tracing::Span::current();
            handle
                .spawn_blocking(move || {
                    let _entered = span.enter();
                    detector.decode_encoded(&bytes)
                })
                .await
                .unwrap_or_else(|join| Err(QrDetectorError::Task(join)))
        } else {
            debug!("no tokio runtime, decoding inline");
            self.decode_encoded(&bytes)
        };
        self.report("read_from_bytes", result)
    }

    /// Read every QR symbol in an already decoded image
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn decode(&self, image: &DynamicImage) -> Result<Vec<QrResult>> {
        let result = self.decode_image(image);
        self.report("decode", result)
    }

    /// Read every QR symbol in a raw pixel array
    #[instrument(skip_all, fields(width = pixels.width(), height = pixels.height()))]
    pub fn decode_pixels(&self, pixels: PixelArray<'_>) -> Result<Vec<QrResult>> {
        let result = pixels.to_luma().and_then(|gray| self.detect_luma(gray));
        self.report("decode_pixels", result)
    }

    /// Read several files in parallel, keeping the input order
    pub fn read_from_files<P>(&self, paths: &[P]) -> Vec<(PathBuf, Result<Vec<QrResult>>)>
    where
        P: AsRef<Path> + Sync,
    {
        paths
            .par_iter()
            .map(|p| (p.as_ref().to_path_buf(), self.read_from_file(p)))
            .collect()
    }

    /// Enlarge a luminance image by `scale`, clamped by the configured
    /// maximum side
    pub fn preprocess(&self, gray: GrayImage, scale: f32) -> GrayImage {
        upscale(gray, scale, self.config.max_dim).0
    }

    fn load_file(&self, path: &Path) -> Result<DynamicImage> {
        if !path.exists() {
            return Err(QrDetectorError::FileNotFound(path.to_path_buf()));
        }
        image::open(path).map_err(|source| QrDetectorError::ImageRead {
            path: path.to_path_buf(),
            source,
        })
    }

    fn decode_encoded(&self, bytes: &[u8]) -> Result<Vec<QrResult>> {
        let img = image::load_from_memory(bytes).map_err(|err| {
            QrDetectorError::InvalidImage(format!("cannot decode image bytes: {}", err))
        })?;
        debug!(width = img.width(), height = img.height(), "image decoded from bytes");
        self.decode_image(&img)
    }

    fn decode_image(&self, image: &DynamicImage) -> Result<Vec<QrResult>> {
        if image.width() == 0 || image.height() == 0 {
            return Err(QrDetectorError::InvalidImage(format!(
                "image has zero size ({}x{})",
                image.width(),
                image.height()
            )));
        }
        self.detect_luma(image.to_luma8())
    }

    fn detect_luma(&self, gray: GrayImage) -> Result<Vec<QrResult>> {
        let engine = self.engine.as_ref().ok_or(QrDetectorError::EngineUnavailable)?;

        let (prepared, scale) = upscale(gray, self.config.upscale, self.config.max_dim);
        debug!(
            engine = engine.name(),
            width = prepared.width(),
            height = prepared.height(),
            scale_x = scale.0,
            scale_y = scale.1,
            "running decode engine"
        );

        let results: Vec<QrResult> = engine
            .detect(&prepared)?
            .into_iter()
            .map(|r| r.unscale_corners(scale))
            .collect();

        if results.is_empty() {
            debug!("no QR symbols found");
        } else {
            debug!(count = results.len(), "QR symbols decoded");
        }
        Ok(results)
    }

    fn report<T>(&self, op: &'static str, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if self.config.debug {
                error!(op, error = %err, source = ?err.source(), "QR detection failed");
            } else {
                debug!(op, error = %err, "QR detection failed");
            }
        }
        result
    }
}

impl Default for QrDetector {
    fn default() -> Self {
        Self::new()
    }
}
