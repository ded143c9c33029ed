use image::GrayImage;
use image::imageops::{self, FilterType};

/// Pick the effective scale for an image: `requested`, clamped so the
/// longest side stays within `max_dim`. Never below 1.0.
pub fn effective_scale(width: u32, height: u32, requested: f32, max_dim: u32) -> f32 {
    if !requested.is_finite() || requested <= 1.0 {
        return 1.0;
    }
    let longest = width.max(height).max(1) as f32;
    let cap = max_dim as f32 / longest;
    requested.min(cap).max(1.0)
}

/// Upscale with a linear (triangle) filter
///
/// Small symbols are easier for the engine to find after enlarging.
/// Returns the image with the per-axis factors actually applied after
/// rounding, or the image unchanged and `(1.0, 1.0)` when the effective
/// scale is 1.0.
pub fn upscale(gray: GrayImage, requested: f32, max_dim: u32) -> (GrayImage, (f32, f32)) {
    let (width, height) = gray.dimensions();
    let scale = effective_scale(width, height, requested, max_dim);
    if scale <= 1.0 || width == 0 || height == 0 {
        return (gray, (1.0, 1.0));
    }
    let new_w = (width as f32 * scale).round().max(1.0) as u32;
    let new_h = (height as f32 * scale).round().max(1.0) as u32;
    let resized = imageops::resize(&gray, new_w, new_h, FilterType::Triangle);
    let factors = (new_w as f32 / width as f32, new_h as f32 / height as f32);
    (resized, factors)
}
