//! cellfont: bitmap-font text console.
//! Features: BMFont descriptor parsing (XML and text forms), font fallback
//! chains, glyph rasterization and a cell-addressed console with deferred
//! painting, drawn onto any [`DrawTarget`].

pub mod bmfont;
pub mod canvas;
pub mod chain;
pub mod console;
pub mod cursor;
mod error;
pub mod font;
pub mod image_io;
pub mod raster;
pub use bmfont::{BmFont, ChannelMask, ChannelRole, Glyph};
pub use canvas::Canvas;
pub use chain::FontChain;
pub use console::{Console, PaintEntry, Placement, PrintOptions};
pub use cursor::Cursor;
pub use error::{FontError, Result};
pub use font::Font;
pub use raster::GlyphPlacement;

// Test utilities
pub mod test_support;

pub use image::RgbaImage;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel rectangle; `w`/`h` may be zero, in which case it covers nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.w,
            self.h,
        )
    }

    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.right() && p.y < self.bottom()
    }

    /// Overlapping area of both rectangles, `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right > x && bottom > y).then(|| {
            Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// A 2D drawing surface the console renders onto.
///
/// Textures are created from decoded RGBA pages and are owned by whoever
/// created them (normally a [`Font`]). Implementors only have to clip; no
/// scaling is ever requested through this trait.
pub trait DrawTarget {
    type Texture;

    fn create_texture(&mut self, image: RgbaImage) -> Result<Self::Texture>;

    /// Copy `src` of `texture` to `dst`, modulating its colour with `tint`.
    fn copy(&mut self, texture: &Self::Texture, src: Rect, dst: Rect, tint: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn clear(&mut self, color: Color);

    /// Finish the frame. Targets that present elsewhere can ignore it.
    fn present(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_clips_to_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -2, 10, 4);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 0, 5, 2)));
        assert_eq!(a.intersect(&Rect::new(10, 0, 4, 4)), None);
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 2, 4, 4);
        assert!(r.contains(Point::new(2, 2)));
        assert!(!r.contains(Point::new(6, 5)));
    }

    #[test]
    fn edges_saturate_near_i32_max() {
        let r = Rect::new(i32::MAX - 4, 0, 64, 64).translate(8, 8);
        assert_eq!(r.x, i32::MAX);
        assert_eq!(r.right(), i32::MAX);
        assert_eq!(r.intersect(&Rect::new(0, 0, 320, 200)), None);
    }
}
