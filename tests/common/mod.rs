//! Test fixtures: render QR symbols into images

#![allow(dead_code)]

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::bits::Bits;
use qrcode::{Color, QrCode, Version};
use std::io::Cursor;

const MODULE_PX: u32 = 4;
const QUIET_ZONE: u32 = 4;

/// Encode `payload` with automatic mode selection
pub fn qr_image(payload: &[u8]) -> GrayImage {
    let code = QrCode::new(payload).expect("payload fits in a QR symbol");
    render(&code)
}

/// Encode `payload` in byte mode only, so the raw bytes survive untouched
pub fn qr_image_byte_mode(payload: &[u8]) -> GrayImage {
    let mut bits = Bits::new(Version::Normal(5));
    bits.push_byte_data(payload).expect("payload fits in version 5");
    bits.push_terminator(qrcode::EcLevel::M).expect("terminator fits");
    let code = QrCode::with_bits(bits, qrcode::EcLevel::M).expect("valid symbol");
    render(&code)
}

fn render(code: &QrCode) -> GrayImage {
    let modules = code.width() as u32;
    let side = (modules + 2 * QUIET_ZONE) * MODULE_PX;
    let mut img = GrayImage::from_pixel(side, side, Luma([255]));
    for y in 0..modules {
        for x in 0..modules {
            if code[(x as usize, y as usize)] != Color::Dark {
                continue;
            }
            let px = (x + QUIET_ZONE) * MODULE_PX;
            let py = (y + QUIET_ZONE) * MODULE_PX;
            for dy in 0..MODULE_PX {
                for dx in 0..MODULE_PX {
                    img.put_pixel(px + dx, py + dy, Luma([0]));
                }
            }
        }
    }
    img
}

/// PNG-encode an image into memory
pub fn png_bytes(img: &GrayImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img.clone())
        .write_to(&mut buf, ImageFormat::Png)
        .expect("png encoding");
    buf.into_inner()
}
