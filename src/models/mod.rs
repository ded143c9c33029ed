pub mod point;
pub mod qr_result;

pub use point::Point;
pub use qr_result::{EcLevel, QrResult};
