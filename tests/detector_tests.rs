//! Integration tests for the detector facade
//!
//! Symbols are generated at test time, written to disk or encoded in memory,
//! and read back through every entry point. They need the bundled engine.

#![cfg(feature = "rqrr")]

mod common;

use common::{png_bytes, qr_image, qr_image_byte_mode};
use image::{DynamicImage, GrayImage, Luma};
use qr_detector::{
    DetectorConfig, EcLevel, PixelArray, PixelLayout, QrDetector, QrDetectorError, TextEncoding,
};
use std::fs;

#[test]
fn test_read_from_file_known_payload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.png");
    qr_image(b"https://example.com/hello").save(&path).unwrap();

    let results = QrDetector::new().read_from_file(&path).unwrap();
    assert!(!results.is_empty(), "expected a symbol in {}", path.display());

    let first = &results[0];
    assert_eq!(first.decode("utf-8").unwrap(), "https://example.com/hello");
    assert!((1..=40).contains(&first.version()));
    assert!(first.mask() < 8);
    // The generator defaults to level M
    assert_eq!(first.ec_level(), EcLevel::M);
}

#[test]
fn test_corners_in_original_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corners.png");
    let img = qr_image(b"corner check");
    let (w, h) = img.dimensions();
    img.save(&path).unwrap();

    let results = QrDetector::new().read_from_file(&path).unwrap();
    assert_eq!(results.len(), 1);
    for p in results[0].corners() {
        assert!(p.x >= 0.0 && p.x <= w as f32, "x out of range: {}", p.x);
        assert!(p.y >= 0.0 && p.y <= h as f32, "y out of range: {}", p.y);
    }
}

#[test]
fn test_read_from_file_corrupted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not really a png").unwrap();

    let err = QrDetector::new().read_from_file(&path).unwrap_err();
    assert!(matches!(err, QrDetectorError::ImageRead { .. }), "got {err:?}");
}

#[test]
fn test_read_from_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.png");

    let err = QrDetector::new().read_from_file(&path).unwrap_err();
    assert!(matches!(err, QrDetectorError::FileNotFound(ref p) if *p == path));
}

#[test]
fn test_shift_jis_payload_round_trip() {
    let text = "こんにちは世界";
    let (sjis, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
    assert!(!had_errors);

    let img = DynamicImage::ImageLuma8(qr_image_byte_mode(&sjis));
    let results = QrDetector::new().decode(&img).unwrap();
    assert_eq!(results.len(), 1);

    let result = &results[0];
    assert_eq!(result.data(), sjis.as_ref());
    assert_eq!(result.decode("shift_jis").unwrap(), text);
    assert!(matches!(
        result.decode("utf-8"),
        Err(QrDetectorError::Encoding { .. })
    ));
}

#[test]
fn test_latin1_payload() {
    let img = DynamicImage::ImageLuma8(qr_image_byte_mode(&[0x43, 0x61, 0x66, 0xe9]));
    let results = QrDetector::new().decode(&img).unwrap();
    assert_eq!(results[0].decode("iso-8859-1").unwrap(), "Café");
    assert_eq!(results[0].decode_with(TextEncoding::Latin1).unwrap(), "Café");
}

#[test]
fn test_decode_pixel_array_bgr() {
    let gray = qr_image(b"pixel array");
    let (w, h) = gray.dimensions();
    let bgr: Vec<u8> = gray.pixels().flat_map(|p| [p.0[0]; 3]).collect();

    let pixels = PixelArray::new(&bgr, w as usize, h as usize, PixelLayout::Bgr).unwrap();
    let results = QrDetector::new().decode_pixels(pixels).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text().unwrap(), "pixel array");
}

#[test]
fn test_blank_image_is_empty_not_error() {
    let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(200, 200, Luma([255])));
    let results = QrDetector::new().decode(&img).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_without_engine_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.png");
    qr_image(b"hello").save(&path).unwrap();

    let detector = QrDetector::without_engine(DetectorConfig::default());
    let err = detector.read_from_file(&path).unwrap_err();
    assert!(matches!(err, QrDetectorError::EngineUnavailable));
}

#[test]
fn test_read_from_files_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for i in 0..4 {
        let path = dir.path().join(format!("code{i}.png"));
        qr_image(format!("payload {i}").as_bytes()).save(&path).unwrap();
        paths.push(path);
    }
    paths.push(dir.path().join("missing.png"));

    let outcomes = QrDetector::new().read_from_files(&paths);
    assert_eq!(outcomes.len(), 5);
    for (i, (path, outcome)) in outcomes.iter().take(4).enumerate() {
        assert_eq!(path, &paths[i]);
        let results = outcome.as_ref().unwrap();
        assert_eq!(results[0].text().unwrap(), format!("payload {i}"));
    }
    assert!(matches!(outcomes[4].1, Err(QrDetectorError::FileNotFound(_))));
}

#[tokio::test]
async fn test_read_from_bytes_png() {
    let bytes = png_bytes(&qr_image(b"from bytes"));
    let results = QrDetector::new().read_from_bytes(bytes).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text().unwrap(), "from bytes");
}

#[tokio::test]
async fn test_read_from_bytes_empty() {
    let err = QrDetector::new()
        .read_from_bytes(Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, QrDetectorError::EmptyInput));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_read_from_bytes_concurrent_no_cross_talk() {
    let detector = QrDetector::new();
    let payloads: Vec<String> = (0..8).map(|i| format!("buffer number {i}")).collect();

    let handles: Vec<_> = payloads
        .iter()
        .map(|payload| {
            let detector = detector.clone();
            let bytes = png_bytes(&qr_image(payload.as_bytes()));
            tokio::spawn(async move { detector.read_from_bytes(bytes).await })
        })
        .collect();

    for (payload, handle) in payloads.iter().zip(handles) {
        let results = handle.await.unwrap().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(&results[0].text().unwrap(), payload);
    }
}
