use image::GrayImage;
use rqrr::PreparedImage;
use tracing::{debug, trace};

use super::DecodeEngine;
use crate::error::Result;
use crate::models::{EcLevel, Point, QrResult};

/// Decode engine backed by the `rqrr` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrEngine;

impl RqrrEngine {
    /// Create the engine
    pub fn new() -> Self {
        Self
    }
}

impl DecodeEngine for RqrrEngine {
    fn name(&self) -> &'static str {
        "rqrr"
    }

    fn detect(&self, image: &GrayImage) -> Result<Vec<QrResult>> {
        let (width, height) = image.dimensions();
        let mut prepared = PreparedImage::prepare_from_greyscale(
            width as usize,
            height as usize,
            |x, y| image.get_pixel(x as u32, y as u32).0[0],
        );
        let grids = prepared.detect_grids();
        trace!(grids = grids.len(), width, height, "rqrr grids located");

        let mut results = Vec::with_capacity(grids.len());
        for (idx, grid) in grids.iter().enumerate() {
            let mut data = Vec::new();
            let meta = match grid.decode_to(&mut data) {
                Ok(meta) => meta,
                Err(err) => {
                    debug!(grid = idx, error = %err, "grid failed to decode");
                    continue;
                }
            };
            if data.is_empty() {
                debug!(grid = idx, "grid decoded to an empty payload, skipping");
                continue;
            }

            let corners = grid.bounds.map(|p| Point::new(p.x as f32, p.y as f32));
            results.push(QrResult::new(
                data,
                meta.version.0.min(40) as u8,
                EcLevel::from_format_bits(meta.ecc_level as u8),
                (meta.mask & 0x07) as u8,
                corners,
            ));
        }

        Ok(results)
    }
}
