use std::path::Path;

use crate::{bmfont::Glyph, font::Font, raster, Color, DrawTarget, GlyphPlacement};

/// Ordered list of fonts searched front to back for a codepoint.
pub struct FontChain<T> {
    fonts: Vec<Font<T>>,
}

impl<T> FontChain<T> {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Append a font at the lowest priority.
    pub fn push(&mut self, font: Font<T>) {
        self.fonts.push(font);
    }

    /// Load a descriptor (and its pages) and append it.
    pub fn load<D>(&mut self, target: &mut D, path: &Path)
    where
        D: DrawTarget<Texture = T>,
    {
        self.push(Font::load(target, path));
    }

    /// First font, in insertion order, that defines `ch`.
    pub fn resolve(&self, ch: char) -> Option<(&Font<T>, &Glyph)> {
        self.fonts
            .iter()
            .find_map(|font| font.glyph(ch).map(|glyph| (font, glyph)))
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Font<T>> {
        self.fonts.iter()
    }

    /// Print with a fixed 8x8 advance, ignoring glyph offsets and any
    /// clipping. `'\n'` returns to `x` and moves down one row.
    pub fn print<D>(&self, target: &mut D, x: i32, y: i32, text: &str, tint: Color)
    where
        D: DrawTarget<Texture = T>,
    {
        let (mut pen_x, mut pen_y) = (x, y);
        for ch in text.chars() {
            if ch == '\n' {
                pen_x = x;
                pen_y += raster::FIXED_ADVANCE;
                continue;
            }
            if let Some((font, glyph)) = self.resolve(ch) {
                raster::draw_glyph(
                    target,
                    font,
                    glyph,
                    pen_x,
                    pen_y,
                    GlyphPlacement::CellOrigin,
                    tint,
                );
            }
            pen_x += raster::FIXED_ADVANCE;
        }
    }
}

impl<T> Default for FontChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<Font<T>> for FontChain<T> {
    fn from_iter<I: IntoIterator<Item = Font<T>>>(iter: I) -> Self {
        Self {
            fonts: iter.into_iter().collect(),
        }
    }
}
