//! Cell-addressed text console.
//!
//! Text is laid out on a grid of fixed-size cells inside a pixel viewport.
//! Glyphs come from a [`FontChain`] the console only references weakly; once
//! the chain is dropped every print becomes a no-op.
//!
//! There are two ways to print:
//! - immediately, with [`Console::write`], [`Console::write_at`] and
//!   [`Console::write_in`];
//! - deferred, by queueing [`PaintEntry`]s with [`Console::print`] and
//!   replaying them with [`Console::flush`]. The queue is only emptied by
//!   [`Console::cls`], so a caller that never clears draws every entry again
//!   on each flush.
use std::rc::{Rc, Weak};

use bitflags::bitflags;

use crate::{
    chain::FontChain, cursor::Cursor, raster, Color, DrawTarget, GlyphPlacement, Point, Rect,
};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PrintOptions: u8 {
        /// Swap foreground and background for the glyph and its cell.
        const INVERSE = 1 << 0;
        /// Fill the cell with the background colour before the glyph.
        const FILL_CELL_BG = 1 << 1;
    }
}

/// Where a deferred entry starts. `Coord` and `Rect` are in grid cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Continue from the console cursor.
    #[default]
    Cursor,
    /// Move the console cursor to this cell, then continue from it.
    Coord(i32, i32),
    /// Print inside this rectangle with a private cursor.
    Rect(Rect),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaintEntry {
    pub placement: Placement,
    pub text: String,
    pub options: PrintOptions,
}

pub struct Console<T> {
    rect: Rect,
    cell_w: i32,
    cell_h: i32,
    fg: Color,
    bg: Color,
    font: Weak<FontChain<T>>,
    cursor: Cursor,
    placement: GlyphPlacement,
    entries: Vec<PaintEntry>,
    scale: u32,
    origin: Point,
}

impl<T> Console<T> {
    pub fn new() -> Self {
        let rect = Rect::new(0, 0, 320, 200);
        Self {
            rect,
            cell_w: 8,
            cell_h: 8,
            fg: Color::WHITE,
            bg: Color::BLACK,
            font: Weak::new(),
            cursor: Cursor::new(rect.x, rect.y, 8, 8),
            placement: GlyphPlacement::default(),
            entries: Vec::new(),
            scale: 1,
            origin: Point::default(),
        }
    }

    pub fn set_font(&mut self, chain: &Rc<FontChain<T>>) {
        self.font = Rc::downgrade(chain);
    }

    /// The referenced chain, if it is still alive.
    pub fn font(&self) -> Option<Rc<FontChain<T>>> {
        self.font.upgrade()
    }

    pub fn set_pos(&mut self, x: i32, y: i32) {
        self.rect.x = x;
        self.rect.y = y;
    }

    pub fn set_size(&mut self, w: i32, h: i32) {
        self.rect.w = w;
        self.rect.h = h;
    }

    pub fn set_cell(&mut self, w: i32, h: i32) {
        self.cell_w = w;
        self.cell_h = h;
        self.cursor.set_size(w, h);
    }

    pub fn set_fg(&mut self, color: Color) {
        self.fg = color;
    }

    pub fn set_bg(&mut self, color: Color) {
        self.bg = color;
    }

    pub fn set_placement(&mut self, placement: GlyphPlacement) {
        self.placement = placement;
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn cell(&self) -> (i32, i32) {
        (self.cell_w, self.cell_h)
    }

    pub fn fg(&self) -> Color {
        self.fg
    }

    pub fn bg(&self) -> Color {
        self.bg
    }

    pub fn left(&self) -> i32 {
        self.rect.x
    }

    pub fn top(&self) -> i32 {
        self.rect.y
    }

    pub fn right(&self) -> i32 {
        self.rect.right()
    }

    pub fn bottom(&self) -> i32 {
        self.rect.bottom()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn grid_to_real(&self, cx: i32, cy: i32) -> Point {
        Point::new(cx.saturating_mul(self.cell_w), cy.saturating_mul(self.cell_h))
    }

    pub fn real_to_grid(&self, px: i32, py: i32) -> Point {
        Point::new(
            px.checked_div(self.cell_w).unwrap_or(0),
            py.checked_div(self.cell_h).unwrap_or(0),
        )
    }

    /// Put the cursor on grid cell (`cx`, `cy`) of the viewport.
    pub fn set_coord(&mut self, cx: i32, cy: i32) {
        self.cursor.set_coord(cx, cy);
        self.cursor.set_pos(
            self.cursor.x().saturating_add(self.left()),
            self.cursor.y().saturating_add(self.top()),
        );
    }

    pub fn cr(&mut self) {
        self.cursor.set_x(self.left());
    }

    pub fn lf(&mut self) {
        self.cursor.advance_y(1);
    }

    pub fn next_line(&mut self) {
        self.cr();
        self.lf();
    }

    pub fn fill<D: DrawTarget>(&self, target: &mut D, inverse: bool) {
        target.fill_rect(self.rect, self.fill_color(inverse));
    }

    /// Fill the cell under the cursor.
    pub fn fill_cell<D: DrawTarget>(&self, target: &mut D, inverse: bool) {
        target.fill_rect(self.cursor.rect(), self.fill_color(inverse));
    }

    fn fill_color(&self, inverse: bool) -> Color {
        if inverse {
            self.fg
        } else {
            self.bg
        }
    }

    /// Print at the console cursor, wrapping at the right edge and stopping
    /// at the bottom edge. The cursor keeps its final position.
    pub fn write<D>(&mut self, target: &mut D, text: &str, options: PrintOptions)
    where
        D: DrawTarget<Texture = T>,
    {
        let Some(chain) = self.font() else {
            return;
        };
        let mut cursor = self.cursor;
        self.layout(target, &chain, &mut cursor, self.rect, text, options);
        self.cursor = cursor;
    }

    /// Print inside the viewport shifted by (`x`, `y`) pixels. The console
    /// cursor is not touched.
    pub fn write_at<D>(&self, target: &mut D, x: i32, y: i32, text: &str, options: PrintOptions)
    where
        D: DrawTarget<Texture = T>,
    {
        let region = Rect::new(x, y, self.rect.w, self.rect.h);
        self.write_in(target, region, text, options);
    }

    /// Print inside `rect`, given in pixels relative to the viewport origin
    /// and clipped to the viewport's right and bottom edges. The console
    /// cursor is not touched.
    pub fn write_in<D>(&self, target: &mut D, rect: Rect, text: &str, options: PrintOptions)
    where
        D: DrawTarget<Texture = T>,
    {
        let Some(chain) = self.font() else {
            return;
        };
        let region = self.clip(rect.translate(self.left(), self.top()));
        let mut cursor = Cursor::new(region.x, region.y, self.cell_w, self.cell_h);
        self.layout(target, &chain, &mut cursor, region, text, options);
    }

    /// Shrink `rect` so it ends at or before the viewport's right/bottom.
    fn clip(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x,
            rect.y,
            rect.w.min(self.right().saturating_sub(rect.x)).max(0),
            rect.h.min(self.bottom().saturating_sub(rect.y)).max(0),
        )
    }

    fn layout<D>(
        &self,
        target: &mut D,
        chain: &FontChain<T>,
        cursor: &mut Cursor,
        region: Rect,
        text: &str,
        options: PrintOptions,
    ) where
        D: DrawTarget<Texture = T>,
    {
        // not even one cell fits
        if region.is_empty() || region.w < self.cell_w {
            return;
        }
        let inverse = options.contains(PrintOptions::INVERSE);
        let fill = inverse || options.contains(PrintOptions::FILL_CELL_BG);
        let tint = if inverse { self.bg } else { self.fg };
        let cell_color = self.fill_color(inverse);

        for ch in text.chars() {
            if ch == '\n' {
                cursor.set_x(region.x);
                cursor.advance_y(1);
                continue;
            }
            if cursor.x().saturating_add(self.cell_w) > region.right() {
                cursor.set_x(region.x);
                cursor.advance_y(1);
            }
            if cursor.y().saturating_add(self.cell_h) > region.bottom() {
                break;
            }
            if fill {
                target.fill_rect(cursor.rect(), cell_color);
            }
            if let Some((font, glyph)) = chain.resolve(ch) {
                raster::draw_glyph(
                    target,
                    font,
                    glyph,
                    cursor.x(),
                    cursor.y(),
                    self.placement,
                    tint,
                );
            }
            cursor.advance_x(1);
        }
    }

    /// Queue `text` for the next [`Console::flush`].
    pub fn print(&mut self, text: impl Into<String>, placement: Placement, options: PrintOptions) {
        self.entries.push(PaintEntry {
            placement,
            text: text.into(),
            options,
        });
    }

    pub fn entries(&self) -> &[PaintEntry] {
        &self.entries
    }

    /// Drop all queued entries and home the cursor.
    pub fn cls(&mut self) {
        self.entries.clear();
        self.cursor.set_pos(self.left(), self.top());
    }

    /// Fill the viewport with the background and replay every queued entry
    /// in order, starting with the cursor at the viewport origin. The queue
    /// is left intact.
    pub fn flush<D>(&mut self, target: &mut D)
    where
        D: DrawTarget<Texture = T>,
    {
        self.fill(target, false);
        self.cursor.set_pos(self.left(), self.top());
        let entries = std::mem::take(&mut self.entries);
        for entry in &entries {
            match entry.placement {
                Placement::Cursor => self.write(target, &entry.text, entry.options),
                Placement::Coord(cx, cy) => {
                    self.set_coord(cx, cy);
                    self.write(target, &entry.text, entry.options);
                }
                Placement::Rect(grid) => {
                    let origin = self.grid_to_real(grid.x, grid.y);
                    let size = self.grid_to_real(grid.w, grid.h);
                    let rect = Rect::new(origin.x, origin.y, size.x, size.y);
                    self.write_in(target, rect, &entry.text, entry.options);
                }
            }
        }
        self.entries = entries;
    }

    pub fn set_scale(&mut self, scale: u32) {
        self.scale = scale.max(1);
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Largest integer scale at which the viewport fits the window, at least 1.
    pub fn fit_scale(&self, window_w: u32, window_h: u32) -> u32 {
        let (w, h) = (self.rect.w.max(1) as u32, self.rect.h.max(1) as u32);
        (window_w / w).min(window_h / h).max(1)
    }

    /// Place the scaled viewport in the middle of a `window_w` x `window_h`
    /// window.
    pub fn center_in(&mut self, window_w: u32, window_h: u32) {
        let scale = self.scale as i32;
        self.origin = Point::new(
            (window_w as i32 - self.rect.w * scale) / 2,
            (window_h as i32 - self.rect.h * scale) / 2,
        );
    }

    /// The viewport as it appears in window pixels.
    pub fn presented_rect(&self) -> Rect {
        let scale = self.scale as i32;
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.rect.w * scale,
            self.rect.h * scale,
        )
    }

    /// Map a window pixel to a pixel relative to the viewport origin, or
    /// `None` when it falls outside the presented viewport.
    pub fn window_to_local(&self, x: i32, y: i32) -> Option<Point> {
        let p = Point::new(x, y);
        if !self.presented_rect().contains(p) {
            return None;
        }
        let scale = self.scale as i32;
        Some(Point::new(
            (p.x - self.origin.x) / scale,
            (p.y - self.origin.y) / scale,
        ))
    }
}

impl<T> Default for Console<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{grid_font, DrawOp, RecordingTarget};
    use pretty_assertions::assert_eq;

    fn chain() -> Rc<FontChain<usize>> {
        Rc::new(FontChain::from_iter([grid_font("a", "ABCDEFGH", 8, 0)]))
    }

    fn console(chain: &Rc<FontChain<usize>>, w: i32, h: i32) -> Console<usize> {
        let mut console = Console::new();
        console.set_font(chain);
        console.set_size(w, h);
        console.set_cell(8, 8);
        console
    }

    #[test]
    fn clip_shrinks_width_and_height_only() {
        let chain = chain();
        let mut c = console(&chain, 64, 32);
        c.set_pos(8, 8);
        assert_eq!(c.clip(Rect::new(40, 16, 64, 64)), Rect::new(40, 16, 32, 24));
        assert_eq!(c.clip(Rect::new(100, 16, 8, 8)).w, 0);
    }

    #[test]
    fn set_coord_is_relative_to_viewport() {
        let chain = chain();
        let mut c = console(&chain, 64, 64);
        c.set_pos(8, 16);
        c.set_coord(2, 1);
        assert_eq!(c.cursor().pos(), Point::new(24, 24));
        c.next_line();
        assert_eq!(c.cursor().pos(), Point::new(8, 32));
    }

    #[test]
    fn glyph_tint_follows_inverse() {
        let chain = chain();
        let mut c = console(&chain, 64, 64);
        c.set_fg(Color::rgb(1, 2, 3));
        c.set_bg(Color::rgb(4, 5, 6));
        let mut target = RecordingTarget::new();
        c.write(&mut target, "A", PrintOptions::INVERSE);
        assert_eq!(
            target.ops,
            vec![
                DrawOp::Fill {
                    rect: Rect::new(0, 0, 8, 8),
                    color: Color::rgb(1, 2, 3),
                },
                DrawOp::Copy {
                    texture: 0,
                    src: Rect::new(0, 0, 8, 8),
                    dst: Rect::new(0, 0, 8, 8),
                    tint: Color::rgb(4, 5, 6),
                },
            ]
        );
    }

    #[test]
    fn fit_scale_and_center() {
        let chain = chain();
        let mut c = console(&chain, 320, 200);
        assert_eq!(c.fit_scale(1000, 700), 3);
        assert_eq!(c.fit_scale(100, 100), 1);
        c.set_scale(3);
        c.center_in(1000, 700);
        assert_eq!(c.presented_rect(), Rect::new(20, 50, 960, 600));
    }

    #[test]
    fn zero_scale_is_clamped() {
        let mut c: Console<usize> = Console::new();
        c.set_scale(0);
        assert_eq!(c.scale(), 1);
    }
}
