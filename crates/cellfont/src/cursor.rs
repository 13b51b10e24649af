use crate::{Point, Rect};

/// Pixel position plus the size of one grid cell.
///
/// Grid coordinates are `position / cell size`; with a zero cell size they
/// read as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    rect: Rect,
}

impl Cursor {
    pub fn new(x: i32, y: i32, cell_w: i32, cell_h: i32) -> Self {
        Self {
            rect: Rect::new(x, y, cell_w, cell_h),
        }
    }

    pub fn set_x(&mut self, x: i32) {
        self.rect.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.rect.y = y;
    }

    pub fn set_pos(&mut self, x: i32, y: i32) {
        self.rect.x = x;
        self.rect.y = y;
    }

    pub fn set_size(&mut self, w: i32, h: i32) {
        self.rect.w = w;
        self.rect.h = h;
    }

    /// Move to grid cell (`cx`, `cy`).
    pub fn set_coord(&mut self, cx: i32, cy: i32) {
        let p = self.to_pos(cx, cy);
        self.set_pos(p.x, p.y);
    }

    /// Cell rectangle under the cursor.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn x(&self) -> i32 {
        self.rect.x
    }

    pub fn y(&self) -> i32 {
        self.rect.y
    }

    pub fn pos(&self) -> Point {
        Point::new(self.rect.x, self.rect.y)
    }

    pub fn size(&self) -> (i32, i32) {
        (self.rect.w, self.rect.h)
    }

    pub fn coord_x(&self) -> i32 {
        self.to_coord(self.rect.x, 0).x
    }

    pub fn coord_y(&self) -> i32 {
        self.to_coord(0, self.rect.y).y
    }

    pub fn coord(&self) -> Point {
        self.to_coord(self.rect.x, self.rect.y)
    }

    pub fn to_pos(&self, cx: i32, cy: i32) -> Point {
        Point::new(
            cx.saturating_mul(self.rect.w),
            cy.saturating_mul(self.rect.h),
        )
    }

    pub fn to_coord(&self, px: i32, py: i32) -> Point {
        Point::new(
            px.checked_div(self.rect.w).unwrap_or(0),
            py.checked_div(self.rect.h).unwrap_or(0),
        )
    }

    /// Move by `dx` cells horizontally and `dy` cells vertically.
    pub fn advance(&mut self, dx: i32, dy: i32) {
        let step = self.to_pos(dx, dy);
        self.rect.x = self.rect.x.saturating_add(step.x);
        self.rect.y = self.rect.y.saturating_add(step.y);
    }

    pub fn advance_x(&mut self, n: i32) {
        self.advance(n, 0);
    }

    pub fn advance_y(&mut self, n: i32) {
        self.advance(0, n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_moves_whole_cells() {
        let mut c = Cursor::new(0, 0, 8, 12);
        c.advance_x(3);
        assert_eq!(c.pos(), Point::new(24, 0));
        c.advance_y(2);
        assert_eq!(c.pos(), Point::new(24, 24));
        assert_eq!(c.coord(), Point::new(3, 2));
    }

    #[test]
    fn coord_round_trips_through_pixels() {
        let mut c = Cursor::new(0, 0, 8, 8);
        c.set_coord(5, 4);
        assert_eq!(c.pos(), Point::new(40, 32));
        assert_eq!(c.coord_x(), 5);
        assert_eq!(c.coord_y(), 4);
        assert_eq!(c.to_coord(47, 39), Point::new(5, 4));
    }

    #[test]
    fn zero_cell_size_does_not_divide() {
        let c = Cursor::new(10, 10, 0, 0);
        assert_eq!(c.coord(), Point::new(0, 0));
    }

    #[test]
    fn rect_carries_cell_size() {
        let mut c = Cursor::default();
        c.set_size(8, 16);
        c.set_pos(4, 2);
        assert_eq!(c.rect(), Rect::new(4, 2, 8, 16));
        assert_eq!(c.size(), (8, 16));
    }
}
