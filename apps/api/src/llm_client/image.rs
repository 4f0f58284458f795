//! Image payloads attached to model calls.
//!
//! Uploads are accepted as JPG or PNG; the MIME type is detected from the
//! file's magic bytes rather than trusted from the client.

use base64::Engine;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageMime {
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg")]
    Jpeg,
}

impl ImageMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Png => "image/png",
            ImageMime::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ImageError {
    #[error("Uploaded image is empty")]
    Empty,

    #[error("Unsupported image format (expected JPG or PNG)")]
    UnsupportedFormat,
}

/// Image bytes plus the MIME type they are declared with on the wire.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    bytes: Bytes,
    mime: ImageMime,
}

impl ImagePayload {
    /// Sniffs the format from the leading bytes and wraps the upload.
    pub fn from_upload(bytes: Bytes) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        let mime = if bytes.starts_with(PNG_MAGIC) {
            ImageMime::Png
        } else if bytes.starts_with(JPEG_MAGIC) {
            ImageMime::Jpeg
        } else {
            return Err(ImageError::UnsupportedFormat);
        };
        Ok(Self { bytes, mime })
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Standard base64 encoding used for Gemini `inline_data` parts.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}

#[cfg(test)]
pub(crate) fn tiny_png() -> Bytes {
    let mut data = PNG_MAGIC.to_vec();
    data.extend_from_slice(b"\0\0\0\rIHDR");
    Bytes::from(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_detected() {
        let payload = ImagePayload::from_upload(tiny_png()).unwrap();
        assert_eq!(payload.mime(), ImageMime::Png);
        assert_eq!(payload.mime().as_str(), "image/png");
    }

    #[test]
    fn test_jpeg_detected() {
        let payload =
            ImagePayload::from_upload(Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00])).unwrap();
        assert_eq!(payload.mime(), ImageMime::Jpeg);
    }

    #[test]
    fn test_empty_upload_rejected() {
        assert_eq!(
            ImagePayload::from_upload(Bytes::new()).unwrap_err(),
            ImageError::Empty
        );
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = ImagePayload::from_upload(Bytes::from_static(b"GIF89a....")).unwrap_err();
        assert_eq!(err, ImageError::UnsupportedFormat);
    }

    #[test]
    fn test_base64_encoding() {
        let payload =
            ImagePayload::from_upload(Bytes::from_static(&[0xFF, 0xD8, 0xFF])).unwrap();
        assert_eq!(payload.to_base64(), "/9j/");
    }
}
