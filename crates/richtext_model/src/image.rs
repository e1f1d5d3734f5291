//! Embedded image payloads
//!
//! Images are carried as raw encoded bytes. The format is sniffed from the
//! leading magic bytes and determines the MIME type and file extension used
//! when the image is written out.

use serde::{Deserialize, Serialize};

/// Encoded image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Svg,
    Unknown,
}

impl ImageFormat {
    /// Detect format from magic bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        if data.starts_with(b"\x89PNG") {
            Self::Png
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else if data.starts_with(b"GIF8") {
            Self::Gif
        } else if data.starts_with(b"BM") {
            Self::Bmp
        } else if Self::looks_like_svg(data) {
            Self::Svg
        } else {
            Self::Unknown
        }
    }

    fn looks_like_svg(data: &[u8]) -> bool {
        let head = &data[..data.len().min(256)];
        match std::str::from_utf8(head) {
            Ok(text) => {
                let text = text.to_ascii_lowercase();
                text.contains("<svg") || text.contains("<?xml")
            }
            Err(_) => false,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Svg => "image/svg+xml",
            Self::Unknown => "application/octet-stream",
        }
    }

    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Svg => "svg",
            Self::Unknown => "bin",
        }
    }
}

/// Raw image bytes with their detected format and pixel size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageData {
    /// Wrap encoded bytes, sniffing format and, where the header allows,
    /// the pixel dimensions
    pub fn new(bytes: Vec<u8>) -> Self {
        let format = ImageFormat::from_bytes(&bytes);
        let (width, height) = match header_dimensions(&bytes, format) {
            Some((w, h)) => (Some(w), Some(h)),
            None => (None, None),
        };
        Self {
            bytes,
            format,
            width,
            height,
        }
    }

    /// Override the display size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn be_u32(data: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_be_bytes(data.get(at..at + 4)?.try_into().ok()?))
}

fn le_u32(data: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_le_bytes(data.get(at..at + 4)?.try_into().ok()?))
}

fn le_u16(data: &[u8], at: usize) -> Option<u32> {
    Some(u16::from_le_bytes(data.get(at..at + 2)?.try_into().ok()?) as u32)
}

fn be_u16(data: &[u8], at: usize) -> Option<u32> {
    Some(u16::from_be_bytes(data.get(at..at + 2)?.try_into().ok()?) as u32)
}

fn header_dimensions(data: &[u8], format: ImageFormat) -> Option<(u32, u32)> {
    match format {
        // IHDR follows the 8-byte signature and chunk header
        ImageFormat::Png => Some((be_u32(data, 16)?, be_u32(data, 20)?)),
        ImageFormat::Gif => Some((le_u16(data, 6)?, le_u16(data, 8)?)),
        // Height is negative for top-down bitmaps
        ImageFormat::Bmp => Some((le_u32(data, 18)?, (le_u32(data, 22)? as i32).unsigned_abs())),
        ImageFormat::Jpeg => jpeg_dimensions(data),
        ImageFormat::Svg | ImageFormat::Unknown => None,
    }
}

fn jpeg_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }
        let marker = data[pos + 1];
        // SOF0..SOF2 carry the frame size
        if matches!(marker, 0xC0..=0xC2) {
            let height = be_u16(data, pos + 5)?;
            let width = be_u16(data, pos + 7)?;
            return Some((width, height));
        }
        let length = be_u16(data, pos + 2)? as usize;
        pos += 2 + length;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut data = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR".to_vec();
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ImageFormat::from_bytes(&png_header(1, 1)), ImageFormat::Png);
        assert_eq!(ImageFormat::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_bytes(b"GIF89a"), ImageFormat::Gif);
        assert_eq!(ImageFormat::from_bytes(b"BM\x00\x00"), ImageFormat::Bmp);
        assert_eq!(ImageFormat::from_bytes(b"<SVG xmlns='x'/>"), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_bytes(b"xy"), ImageFormat::Unknown);
        assert_eq!(ImageFormat::from_bytes(&[]), ImageFormat::Unknown);
    }

    #[test]
    fn test_mime_and_extension() {
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::Svg.mime_type(), "image/svg+xml");
        assert_eq!(ImageFormat::Unknown.extension(), "bin");
    }

    #[test]
    fn test_png_dimensions() {
        let image = ImageData::new(png_header(640, 480));
        assert_eq!(image.format, ImageFormat::Png);
        assert_eq!(image.width, Some(640));
        assert_eq!(image.height, Some(480));
    }

    #[test]
    fn test_gif_dimensions() {
        let image = ImageData::new(b"GIF89a\x20\x00\x10\x00".to_vec());
        assert_eq!((image.width, image.height), (Some(32), Some(16)));
    }

    #[test]
    fn test_truncated_header_has_no_size() {
        let image = ImageData::new(b"\x89PNG".to_vec());
        assert_eq!(image.format, ImageFormat::Png);
        assert_eq!(image.width, None);
        let sized = image.with_size(10, 20);
        assert_eq!(sized.height, Some(20));
    }
}
