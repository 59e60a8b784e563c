//! Deterministic image re-encoding.
//!
//! Native clipboard bitmaps are not byte-stable across platforms or calls, so
//! every image is decoded and re-encoded as PNG before it is measured or hex
//! previewed.

pub mod dib;

use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

use crate::error::ClipboardError;
use crate::formats;
use crate::models::{FormatEntry, Payload};

/// Re-encoded image ready for preview
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// PNG bytes
    pub data: Vec<u8>,
    /// Pixel dimensions, when known
    pub dimensions: Option<(u32, u32)>,
}

impl EncodedImage {
    pub fn encoding(&self) -> &'static str {
        "PNG"
    }
}

/// Re-encode the image held by a format entry as PNG
pub fn reencode_entry(entry: &FormatEntry<'_>) -> Result<EncodedImage, ClipboardError> {
    match entry.payload() {
        Some(Payload::Image(image)) => encode_png(image),
        Some(Payload::Bytes(bytes)) => reencode_bytes(entry.format_id(), bytes),
        _ => Err(ClipboardError::Encode("no image data available".to_string())),
    }
}

/// Decode an encoded or DIB image payload and re-encode it as PNG
pub fn reencode_bytes(format_id: &str, bytes: &[u8]) -> Result<EncodedImage, ClipboardError> {
    let image = if formats::is_dib_format(format_id) {
        let bmp = dib::dib_to_bmp(bytes)?;
        image::load_from_memory_with_format(&bmp, ImageFormat::Bmp)
    } else {
        image::load_from_memory(bytes)
    }
    .map_err(|e| ClipboardError::Encode(e.to_string()))?;

    encode_png(&image)
}

/// Encode a decoded image as PNG
pub fn encode_png(image: &DynamicImage) -> Result<EncodedImage, ClipboardError> {
    let mut data = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
        .map_err(|e| ClipboardError::Encode(e.to_string()))?;

    let dimensions = match (image.width(), image.height()) {
        (0, _) | (_, 0) => None,
        size => Some(size),
    };

    log::debug!("Re-encoded image to {} PNG bytes", data.len());
    Ok(EncodedImage { data, dimensions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample_image() -> DynamicImage {
        let mut image = RgbaImage::new(4, 3);
        image.put_pixel(1, 1, Rgba([255, 0, 0, 255]));
        DynamicImage::ImageRgba8(image)
    }

    #[test]
    fn test_encode_png_is_stable() {
        let first = encode_png(&sample_image()).unwrap();
        let second = encode_png(&sample_image()).unwrap();

        assert_eq!(first.data, second.data);
        assert_eq!(first.dimensions, Some((4, 3)));
        assert_eq!(&first.data[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_reencode_png_bytes() {
        let png = encode_png(&sample_image()).unwrap().data;
        let reencoded = reencode_bytes("image/png", &png).unwrap();
        assert_eq!(reencoded.dimensions, Some((4, 3)));
    }

    #[test]
    fn test_reencode_garbage_fails() {
        let err = reencode_bytes("image/png", b"definitely not a png").unwrap_err();
        assert!(matches!(err, ClipboardError::Encode(_)));
    }

    #[test]
    fn test_reencode_dib() {
        // 2x1 24-bit bottom-up DIB, rows padded to 4 bytes
        let mut dib = Vec::new();
        dib.extend_from_slice(&40u32.to_le_bytes());
        dib.extend_from_slice(&2i32.to_le_bytes());
        dib.extend_from_slice(&1i32.to_le_bytes());
        dib.extend_from_slice(&1u16.to_le_bytes());
        dib.extend_from_slice(&24u16.to_le_bytes());
        dib.extend_from_slice(&0u32.to_le_bytes());
        dib.extend_from_slice(&8u32.to_le_bytes());
        dib.extend_from_slice(&[0; 16]);
        dib.extend_from_slice(&[0, 0, 255, 0, 255, 0, 0, 0]);

        let reencoded = reencode_bytes("DeviceIndependentBitmap", &dib).unwrap();
        assert_eq!(reencoded.dimensions, Some((2, 1)));
        assert_eq!(reencoded.encoding(), "PNG");
    }
}
