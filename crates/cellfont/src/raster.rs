//! Single-glyph blits from an atlas page onto a draw target.
use crate::{bmfont::Glyph, font::Font, Color, DrawTarget, Rect};

/// Advance used by [`crate::FontChain::print`].
pub const FIXED_ADVANCE: i32 = 8;

/// Where a glyph's atlas rectangle lands relative to the pen position.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum GlyphPlacement {
    /// Top-left of the glyph at the pen; `xoffset`/`yoffset` ignored.
    CellOrigin,
    /// Pen shifted by the glyph's `xoffset`/`yoffset`.
    #[default]
    GlyphOffset,
}

impl GlyphPlacement {
    pub fn dest(self, glyph: &Glyph, x: i32, y: i32) -> Rect {
        match self {
            GlyphPlacement::CellOrigin => Rect::new(x, y, glyph.width, glyph.height),
            GlyphPlacement::GlyphOffset => Rect::new(
                x + glyph.xoffset,
                y + glyph.yoffset,
                glyph.width,
                glyph.height,
            ),
        }
    }
}

/// Blit `glyph` at pen position (`x`, `y`).
///
/// Returns `false` without touching the target when the glyph's page is
/// not realized.
pub fn draw_glyph<D: DrawTarget>(
    target: &mut D,
    font: &Font<D::Texture>,
    glyph: &Glyph,
    x: i32,
    y: i32,
    placement: GlyphPlacement,
    tint: Color,
) -> bool {
    let Some(page) = font.page(glyph.page) else {
        return false;
    };
    let src = Rect::new(glyph.x, glyph.y, glyph.width, glyph.height);
    target.copy(page, src, placement.dest(glyph, x, y), tint);
    true
}
