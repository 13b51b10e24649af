//! Test support utilities for cellfont.
//!
//! This module provides helper types and functions that are useful for testing
//! console layout, but are not part of the public API.

use std::collections::HashMap;

use crate::{
    bmfont::{BmFont, Glyph, Page},
    font::Font,
    Color, DrawTarget, Rect, Result, RgbaImage,
};

/// One call made against a [`RecordingTarget`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOp {
    Copy {
        texture: usize,
        src: Rect,
        dst: Rect,
        tint: Color,
    },
    Fill {
        rect: Rect,
        color: Color,
    },
    Clear(Color),
    Present,
}

/// A target that records every call instead of drawing.
///
/// Textures are plain ids handed out in creation order.
#[derive(Default)]
pub struct RecordingTarget {
    pub ops: Vec<DrawOp>,
    next_texture: usize,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destination rectangles of all glyph copies, in call order.
    pub fn copies(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Copy { dst, .. } => Some(*dst),
                _ => None,
            })
            .collect()
    }

    pub fn fills(&self) -> Vec<(Rect, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }
}

impl DrawTarget for RecordingTarget {
    type Texture = usize;

    fn create_texture(&mut self, _image: RgbaImage) -> Result<Self::Texture> {
        let id = self.next_texture;
        self.next_texture += 1;
        Ok(id)
    }

    fn copy(&mut self, texture: &usize, src: Rect, dst: Rect, tint: Color) {
        self.ops.push(DrawOp::Copy {
            texture: *texture,
            src,
            dst,
            tint,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Fill { rect, color });
    }

    fn clear(&mut self, color: Color) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn present(&mut self) {
        self.ops.push(DrawOp::Present);
    }
}

/// Build a single-page font whose glyphs are `cell`-sized squares laid out
/// left to right in the atlas, one per character of `chars`.
pub fn grid_font(face: &str, chars: &str, cell: i32, texture: usize) -> Font<usize> {
    let mut descriptor = BmFont::default();
    descriptor.info.face = face.to_string();
    descriptor.pages.push(Page {
        id: 0,
        file: format!("{face}_0.png"),
    });
    let glyphs: HashMap<u32, Glyph> = chars
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let glyph = Glyph {
                id: ch as u32,
                x: i as i32 * cell,
                y: 0,
                width: cell,
                height: cell,
                xadvance: cell,
                ..Default::default()
            };
            (glyph.id, glyph)
        })
        .collect();
    descriptor.glyphs = glyphs;
    Font::from_parts(descriptor, vec![Some(texture)])
}
