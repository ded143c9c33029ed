//! Text encodings for rendering QR payload bytes
//!
//! Labels follow the WHATWG encoding registry, with two conveniences:
//! `_` is accepted in place of `-` (`shift_jis`, `utf_8`), and the Latin-1
//! family decodes as true ISO-8859-1 rather than windows-1252.

use std::borrow::Cow;

use encoding_rs::Encoding;

use crate::error::{QrDetectorError, Result};

const LATIN1_LABELS: &[&str] = &["latin-1", "latin1", "iso-8859-1", "iso8859-1", "l1"];

/// A resolved text encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// ISO-8859-1: every byte maps to the code point of the same value
    Latin1,
    /// Any encoding from the WHATWG registry
    Whatwg(&'static Encoding),
}

impl TextEncoding {
    /// UTF-8
    pub const UTF_8: TextEncoding = TextEncoding::Whatwg(encoding_rs::UTF_8);
    /// Shift-JIS
    pub const SHIFT_JIS: TextEncoding = TextEncoding::Whatwg(encoding_rs::SHIFT_JIS);

    /// Resolve an encoding label such as `"utf-8"` or `"shift_jis"`
    pub fn for_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        if LATIN1_LABELS.contains(&normalized.as_str()) {
            return Ok(TextEncoding::Latin1);
        }
        Encoding::for_label_no_replacement(label.as_bytes())
            .or_else(|| Encoding::for_label_no_replacement(normalized.as_bytes()))
            .map(TextEncoding::Whatwg)
            .ok_or_else(|| QrDetectorError::UnknownEncoding(label.to_string()))
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Latin1 => "ISO-8859-1",
            TextEncoding::Whatwg(encoding) => encoding.name(),
        }
    }

    /// Decode `bytes` strictly: malformed sequences are an error, not U+FFFD
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
        match self {
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect::<String>().into()),
            TextEncoding::Whatwg(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .ok_or(QrDetectorError::Encoding {
                    encoding: encoding.name(),
                    len: bytes.len(),
                }),
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding::UTF_8
    }
}
