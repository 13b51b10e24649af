//! Software [`DrawTarget`] over an RGBA framebuffer.
use image::{Rgba, RgbaImage};

use crate::{Color, DrawTarget, Rect, Result};

pub struct Canvas {
    frame: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// Framebuffer bytes, R, G, B, A per pixel, row major.
    pub fn frame(&self) -> &[u8] {
        self.frame.as_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.frame
    }

    /// Colour at (`x`, `y`), `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let Rgba([r, g, b, a]) = *self.frame.get_pixel_checked(x, y)?;
        Some(Color::rgba(r, g, b, a))
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.frame.width() as i32, self.frame.height() as i32)
    }

    fn blend(&mut self, x: i32, y: i32, src: [u8; 4]) {
        let px = self.frame.get_pixel_mut(x as u32, y as u32);
        let alpha = src[3] as u32;
        if alpha == 0xFF {
            *px = Rgba(src);
            return;
        }
        let inv = 0xFF - alpha;
        for i in 0..3 {
            px.0[i] = ((src[i] as u32 * alpha + px.0[i] as u32 * inv) / 0xFF) as u8;
        }
        px.0[3] = (alpha + px.0[3] as u32 * inv / 0xFF) as u8;
    }
}

fn modulate(channel: u8, by: u8) -> u8 {
    (channel as u32 * by as u32 / 0xFF) as u8
}

impl DrawTarget for Canvas {
    type Texture = RgbaImage;

    fn create_texture(&mut self, image: RgbaImage) -> Result<Self::Texture> {
        Ok(image)
    }

    fn copy(&mut self, texture: &RgbaImage, src: Rect, dst: Rect, tint: Color) {
        if src.is_empty() || dst.is_empty() {
            return;
        }
        let Some(visible) = dst.intersect(&self.bounds()) else {
            return;
        };
        let (tex_w, tex_h) = (texture.width() as i32, texture.height() as i32);
        for y in visible.y..visible.bottom() {
            let sy = src.y + (y - dst.y) * src.h / dst.h;
            if sy < 0 || sy >= tex_h {
                continue;
            }
            for x in visible.x..visible.right() {
                let sx = src.x + (x - dst.x) * src.w / dst.w;
                if sx < 0 || sx >= tex_w {
                    continue;
                }
                let Rgba([r, g, b, a]) = *texture.get_pixel(sx as u32, sy as u32);
                let a = modulate(a, tint.a);
                if a == 0 {
                    continue;
                }
                let texel = [
                    modulate(r, tint.r),
                    modulate(g, tint.g),
                    modulate(b, tint.b),
                    a,
                ];
                self.blend(x, y, texel);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(visible) = rect.intersect(&self.bounds()) else {
            return;
        };
        if color.a == 0 {
            return;
        }
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                self.blend(x, y, [color.r, color.g, color.b, color.a]);
            }
        }
    }

    fn clear(&mut self, color: Color) {
        let value = Rgba([color.r, color.g, color.b, color.a]);
        for px in self.frame.pixels_mut() {
            *px = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> RgbaImage {
        // 2x2: white, transparent / red, black
        RgbaImage::from_raw(
            2,
            2,
            vec![
                255, 255, 255, 255, 0, 0, 0, 0, //
                255, 0, 0, 255, 0, 0, 0, 255,
            ],
        )
        .unwrap()
    }

    #[test]
    fn fill_is_clipped_to_the_frame() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(Rect::new(2, 2, 10, 10), Color::rgb(9, 9, 9));
        assert_eq!(canvas.pixel(3, 3), Some(Color::rgb(9, 9, 9)));
        assert_eq!(canvas.pixel(1, 1), Some(Color::rgba(0, 0, 0, 0)));
    }

    #[test]
    fn copy_tints_and_skips_transparent_texels() {
        let mut canvas = Canvas::new(4, 4);
        canvas.clear(Color::rgb(0, 0, 200));
        let tex = checker();
        canvas.copy(
            &tex,
            Rect::new(0, 0, 2, 2),
            Rect::new(1, 1, 2, 2),
            Color::rgb(255, 255, 0),
        );
        assert_eq!(canvas.pixel(1, 1), Some(Color::rgb(255, 255, 0)));
        assert_eq!(canvas.pixel(2, 1), Some(Color::rgb(0, 0, 200)));
        assert_eq!(canvas.pixel(1, 2), Some(Color::rgb(255, 0, 0)));
        assert_eq!(canvas.pixel(2, 2), Some(Color::rgb(0, 0, 0)));
    }

    #[test]
    fn copy_partially_offscreen() {
        let mut canvas = Canvas::new(2, 2);
        canvas.copy(
            &checker(),
            Rect::new(0, 0, 2, 2),
            Rect::new(-1, -1, 2, 2),
            Color::WHITE,
        );
        // only the black texel (1,1) lands on (0,0)
        assert_eq!(canvas.pixel(0, 0), Some(Color::rgb(0, 0, 0)));
        assert_eq!(canvas.pixel(1, 1), Some(Color::rgba(0, 0, 0, 0)));
    }

    #[test]
    fn pixel_outside_frame_is_none() {
        let canvas = Canvas::new(2, 3);
        assert_eq!(canvas.pixel(1, 2), Some(Color::rgba(0, 0, 0, 0)));
        assert_eq!(canvas.pixel(2, 0), None);
        assert_eq!(canvas.pixel(0, 3), None);
    }

    #[test]
    fn half_alpha_fill_blends() {
        let mut canvas = Canvas::new(1, 1);
        canvas.clear(Color::rgb(0, 0, 0));
        canvas.fill_rect(Rect::new(0, 0, 1, 1), Color::rgba(255, 255, 255, 128));
        assert_eq!(canvas.pixel(0, 0), Some(Color::rgb(128, 128, 128)));
    }
}
