use super::Point;
use crate::encoding::TextEncoding;
use crate::error::Result;

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl EcLevel {
    /// Get error correction level from the format information bits
    /// (01=L, 00=M, 11=Q, 10=H)
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => EcLevel::L,
            0b00 => EcLevel::M,
            0b11 => EcLevel::Q,
            _ => EcLevel::H,
        }
    }
}

/// One decoded QR symbol
#[derive(Debug, Clone, PartialEq)]
pub struct QrResult {
    data: Vec<u8>,
    version: u8,
    ec_level: EcLevel,
    mask: u8,
    corners: [Point; 4],
}

impl QrResult {
    /// Wrap a decoded payload and its metadata
    pub fn new(
        data: Vec<u8>,
        version: u8,
        ec_level: EcLevel,
        mask: u8,
        corners: [Point; 4],
    ) -> Self {
        Self {
            data,
            version,
            ec_level,
            mask,
            corners,
        }
    }

    /// Raw payload bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the result and return the payload bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Symbol version (1-40)
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Error correction level
    pub fn ec_level(&self) -> EcLevel {
        self.ec_level
    }

    /// Mask pattern (0-7)
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Corner points in the coordinates of the image given to the detector
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    /// Map corners from an image enlarged by `(sx, sy)` back to the original
    pub(crate) fn unscale_corners(mut self, (sx, sy): (f32, f32)) -> Self {
        self.corners = self.corners.map(|p| p.unscale(sx, sy));
        self
    }

    /// Render the payload as text in the encoding named by `label`
    ///
    /// Fails with [`UnknownEncoding`](crate::QrDetectorError::UnknownEncoding)
    /// for an unrecognised label and with
    /// [`Encoding`](crate::QrDetectorError::Encoding) when the bytes are not
    /// valid in that encoding.
    pub fn decode(&self, label: &str) -> Result<String> {
        self.decode_with(TextEncoding::for_label(label)?)
    }

    /// Render the payload with an already resolved encoding
    pub fn decode_with(&self, encoding: TextEncoding) -> Result<String> {
        encoding.decode(&self.data).map(|text| text.into_owned())
    }

    /// Render the payload as UTF-8
    pub fn text(&self) -> Result<String> {
        self.decode_with(TextEncoding::UTF_8)
    }
}
