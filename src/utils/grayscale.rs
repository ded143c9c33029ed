//! Convert raw pixel arrays to 8-bit luminance
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8

use image::GrayImage;
use rayon::prelude::*;

use crate::error::{QrDetectorError, Result};

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Channel order of a raw pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// One luminance byte per pixel
    Gray,
    /// R, G, B
    Rgb,
    /// B, G, R (OpenCV order)
    Bgr,
    /// R, G, B, A
    Rgba,
    /// B, G, R, A
    Bgra,
}

impl PixelLayout {
    /// Bytes per pixel
    pub fn channels(&self) -> usize {
        match self {
            PixelLayout::Gray => 1,
            PixelLayout::Rgb | PixelLayout::Bgr => 3,
            PixelLayout::Rgba | PixelLayout::Bgra => 4,
        }
    }

    /// Offsets of the red and blue channels inside one pixel
    fn red_blue(&self) -> (usize, usize) {
        match self {
            PixelLayout::Bgr | PixelLayout::Bgra => (2, 0),
            _ => (0, 2),
        }
    }
}

/// A borrowed, row-major pixel buffer with no padding between rows
#[derive(Debug, Clone, Copy)]
pub struct PixelArray<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    layout: PixelLayout,
}

impl<'a> PixelArray<'a> {
    /// Validate and wrap a pixel buffer
    pub fn new(data: &'a [u8], width: usize, height: usize, layout: PixelLayout) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(QrDetectorError::InvalidImage(format!(
                "pixel array has zero size ({}x{})",
                width, height
            )));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(layout.channels()))
            .ok_or_else(|| {
                QrDetectorError::InvalidImage(format!(
                    "pixel array too large ({}x{})",
                    width, height
                ))
            })?;
        if data.len() != expected {
            return Err(QrDetectorError::InvalidImage(format!(
                "pixel array of {}x{} {:?} needs {} bytes, got {}",
                width,
                height,
                layout,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            layout,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Convert to a luminance image
    pub fn to_luma(&self) -> Result<GrayImage> {
        let (w, h) = match (u32::try_from(self.width), u32::try_from(self.height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(QrDetectorError::InvalidImage(format!(
                    "pixel array dimensions exceed u32 ({}x{})",
                    self.width, self.height
                )));
            }
        };
        GrayImage::from_raw(w, h, to_grayscale(self)).ok_or_else(|| {
            QrDetectorError::InvalidImage("luminance buffer size mismatch".to_string())
        })
    }
}

/// Convert a validated pixel array to grayscale, processing rows in parallel
fn to_grayscale(pixels: &PixelArray<'_>) -> Vec<u8> {
    let PixelArray {
        data,
        width,
        height,
        layout,
    } = *pixels;
    if layout == PixelLayout::Gray {
        return data.to_vec();
    }
    let channels = layout.channels();
    let (ri, bi) = layout.red_blue();
    let mut gray = vec![0u8; width * height];

    gray.par_chunks_mut(width)
        .zip(data.par_chunks(width * channels))
        .for_each(|(row, src)| {
            for (out, px) in row.iter_mut().zip(src.chunks_exact(channels)) {
                let r = px[ri] as u32;
                let g = px[1] as u32;
                let b = px[bi] as u32;
                let lum = (COEF_R * r + COEF_G * g + COEF_B * b) >> 8;
                *out = lum.min(255) as u8;
            }
        });

    gray
}
