use std::rc::Rc;

use cellfont::{
    test_support::{grid_font, DrawOp, RecordingTarget},
    Color, Font, FontChain, Rect,
};
use pretty_assertions::assert_eq;

#[test]
fn first_font_wins() {
    let chain = FontChain::from_iter([grid_font("a", "XY", 8, 0), grid_font("b", "ZX", 8, 1)]);
    let (font, glyph) = chain.resolve('X').unwrap();
    assert_eq!(font.name(), "a");
    assert_eq!(glyph.x, 0);

    let (font, glyph) = chain.resolve('Z').unwrap();
    assert_eq!(font.name(), "b");
    assert_eq!(glyph.x, 0);
}

#[test]
fn push_appends_at_lowest_priority() {
    let mut chain = FontChain::new();
    chain.push(grid_font("b", "X", 8, 1));
    chain.push(grid_font("a", "X", 8, 0));
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.resolve('X').unwrap().0.name(), "b");
}

#[test]
fn unknown_codepoint_resolves_to_nothing() {
    let chain = FontChain::from_iter([grid_font("a", "AB", 8, 0)]);
    assert!(chain.resolve('あ').is_none());
    assert!(FontChain::<usize>::new().resolve('A').is_none());
    assert!(FontChain::from_iter([Font::<usize>::empty()]).resolve('A').is_none());
}

#[test]
fn fixed_print_uses_eight_pixel_advance() {
    let chain = Rc::new(FontChain::from_iter([grid_font("a", "AB", 6, 0)]));
    let mut target = RecordingTarget::new();
    chain.print(&mut target, 10, 20, "AB\n?A", Color::WHITE);
    assert_eq!(
        target.copies(),
        vec![
            Rect::new(10, 20, 6, 6),
            Rect::new(18, 20, 6, 6),
            Rect::new(18, 28, 6, 6),
        ]
    );
    assert!(matches!(target.ops[0], DrawOp::Copy { tint, .. } if tint == Color::WHITE));
}
