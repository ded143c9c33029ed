//! Detector configuration
//!
//! Defaults can be overridden from the environment with `QR_DEBUG`,
//! `QR_UPSCALE` and `QR_MAX_DIM`.

use std::env;

/// Default pre-detection upscale factor
pub const DEFAULT_UPSCALE: f32 = 2.0;
/// Default cap on the longest side after upscaling
pub const DEFAULT_MAX_DIM: u32 = 4096;

fn parse_env_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Options for [`QrDetector`](crate::QrDetector)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Surface internal errors verbosely (logged at error level)
    pub debug: bool,
    /// Scale factor applied before detection; `<= 1.0` disables it
    pub upscale: f32,
    /// Upper bound on the longest image side after upscaling
    pub max_dim: u32,
}

impl DetectorConfig {
    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        Self {
            debug: env::var("QR_DEBUG").is_ok(),
            upscale: parse_env_f32("QR_UPSCALE", DEFAULT_UPSCALE),
            max_dim: parse_env_u32("QR_MAX_DIM", DEFAULT_MAX_DIM),
        }
    }

    /// Set the debug flag
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the upscale factor
    pub fn with_upscale(mut self, upscale: f32) -> Self {
        self.upscale = upscale;
        self
    }

    /// Set the maximum side length after upscaling
    pub fn with_max_dim(mut self, max_dim: u32) -> Self {
        self.max_dim = max_dim.max(1);
        self
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            debug: false,
            upscale: DEFAULT_UPSCALE,
            max_dim: DEFAULT_MAX_DIM,
        }
    }
}
