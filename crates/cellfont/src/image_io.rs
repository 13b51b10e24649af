//! Page image decoding.
//!
//! Pixel bytes are always stored R, G, B, A in memory regardless of host
//! endianness, so no channel masks are involved downstream.
use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::error::{FontError, Result};

/// Raw decoder output: tightly packed rows of `channels` bytes per pixel.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl DecodedImage {
    fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        if img.color().has_alpha() {
            Self {
                pixels: img.into_rgba8().into_raw(),
                width,
                height,
                channels: 4,
            }
        } else {
            Self {
                pixels: img.into_rgb8().into_raw(),
                width,
                height,
                channels: 3,
            }
        }
    }

    /// Expand to RGBA. Three channels are opaque RGB; anything else is
    /// taken as RGBA with straight alpha.
    pub fn into_rgba(self) -> Result<RgbaImage> {
        let pixels = if self.channels == 3 {
            self.pixels
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 0xFF])
                .collect()
        } else {
            self.pixels
        };
        RgbaImage::from_raw(self.width, self.height, pixels).ok_or_else(|| {
            FontError::Texture(format!(
                "pixel buffer does not match {}x{}",
                self.width, self.height
            ))
        })
    }
}

pub fn decode_page(path: &Path) -> Result<DecodedImage> {
    Ok(DecodedImage::from_dynamic(image::open(path)?))
}

pub fn decode_page_from_memory(bytes: &[u8]) -> Result<DecodedImage> {
    Ok(DecodedImage::from_dynamic(image::load_from_memory(bytes)?))
}

/// Make every pure black pixel fully transparent.
pub fn color_key(image: &mut RgbaImage) {
    for px in image.pixels_mut() {
        if px.0[..3] == [0, 0, 0] {
            px.0[3] = 0;
        }
    }
}

/// Decode `path` into a colour-keyed RGBA page ready for texture creation.
pub fn load_page(path: &Path) -> Result<RgbaImage> {
    let mut rgba = decode_page(path)?.into_rgba()?;
    color_key(&mut rgba);
    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_expands_opaque() {
        let decoded = DecodedImage {
            pixels: vec![1, 2, 3, 4, 5, 6],
            width: 2,
            height: 1,
            channels: 3,
        };
        let rgba = decoded.into_rgba().unwrap();
        assert_eq!(rgba.into_raw(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let decoded = DecodedImage {
            pixels: vec![0; 3],
            width: 2,
            height: 2,
            channels: 4,
        };
        assert!(decoded.into_rgba().is_err());
    }

    #[test]
    fn color_key_clears_black_only() {
        let mut img = RgbaImage::from_raw(2, 1, vec![0, 0, 0, 255, 0, 0, 1, 255]).unwrap();
        color_key(&mut img);
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(1, 0).0[3], 255);
    }

    #[test]
    fn memory_decode_reports_garbage() {
        assert!(matches!(
            decode_page_from_memory(b"not an image"),
            Err(FontError::Image(_))
        ));
    }
}
