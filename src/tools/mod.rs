use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Default dataset root from environment variables.
pub fn dataset_root_from_env() -> PathBuf {
    env::var("QR_DATASET_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("images"))
}

/// Default batch limit from environment variables.
///
/// Returns `None` (whole dataset) when `QR_BATCH_LIMIT` is unset or set to `0`.
pub fn batch_limit_from_env() -> Option<usize> {
    env::var("QR_BATCH_LIMIT")
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
}

/// Iterate dataset image paths in sorted order, optionally truncated.
pub fn dataset_iter<P: AsRef<Path>>(
    root: P,
    limit: Option<usize>,
) -> impl Iterator<Item = PathBuf> {
    let mut images = collect_images(root.as_ref());
    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

/// Recursively collect image files under `root`. Unreadable directories are skipped.
pub fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if is_image_path(&path) {
                images.push(path);
            }
        }
    }

    images
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Hex dump of the first `max` bytes, for payloads that are not valid text.
pub fn hex_preview(bytes: &[u8], max: usize) -> String {
    let mut out: Vec<String> = bytes
        .iter()
        .take(max)
        .map(|b| format!("{:02x}", b))
        .collect();
    if bytes.len() > max {
        out.push("..".to_string());
    }
    out.join(" ")
}
