use std::path::PathBuf;

use thiserror::Error;

/// Every failure the detector can report.
#[derive(Debug, Error)]
pub enum QrDetectorError {
    /// The image path does not exist
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file exists but could not be read as an image
    #[error("cannot read image file {}: {source}", path.display())]
    ImageRead {
        /// File that failed to load
        path: PathBuf,
        /// Underlying image error
        #[source]
        source: image::ImageError,
    },

    /// An empty byte buffer was passed in
    #[error("no image data")]
    EmptyInput,

    /// The input could not be turned into a usable image
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The detector was built without a decode engine
    #[error("no QR decode engine available")]
    EngineUnavailable,

    /// The decode engine itself failed
    #[error("decode engine failed: {0}")]
    Engine(String),

    /// The encoding label is not recognised
    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),

    /// The payload is not valid text in the requested encoding
    #[error("payload is not valid {encoding} ({len} bytes)")]
    Encoding {
        /// Canonical name of the encoding that was tried
        encoding: &'static str,
        /// Payload length in bytes
        len: usize,
    },

    /// The blocking decode task panicked or was cancelled
    #[error("decode task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, QrDetectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_readable() {
        let err = QrDetectorError::FileNotFound(PathBuf::from("missing.png"));
        assert_eq!(err.to_string(), "file not found: missing.png");

        let err = QrDetectorError::Encoding {
            encoding: "Shift_JIS",
            len: 3,
        };
        assert_eq!(err.to_string(), "payload is not valid Shift_JIS (3 bytes)");

        assert_eq!(
            QrDetectorError::EngineUnavailable.to_string(),
            "no QR decode engine available"
        );
    }
}
