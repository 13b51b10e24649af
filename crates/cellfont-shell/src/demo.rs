use std::rc::Rc;

use cellfont::{
    Canvas, Color, Console, DrawTarget, FontChain, Placement, PrintOptions, Rect, RgbaImage,
};
use log::debug;

use crate::shell::{Scene, ShellEvent};

const BACKDROP: Color = Color::rgb(0x80, 0x80, 0x80);

const GREETING: &str = "あいうえおかきくけこ\nハローワールドAAAテスト\nÅǢÅ";
const RULER: &str = "01234567890123456789012345678901234567890123456789";

#[derive(Clone, Copy, Debug)]
pub struct Layout {
    pub cell_w: i32,
    pub cell_h: i32,
    pub cols: i32,
    pub rows: i32,
}

impl Layout {
    pub fn width(&self) -> i32 {
        self.cell_w * self.cols
    }

    pub fn height(&self) -> i32 {
        self.cell_h * self.rows
    }
}

/// Console demo: greeting that follows the pointer, a clipped block of
/// text near the right edge and a couple of queued lines.
pub struct DemoScene {
    // keeps the chain alive for the console's weak reference
    _fonts: Rc<FontChain<RgbaImage>>,
    console: Console<RgbaImage>,
    layout: Layout,
    pointer: (i32, i32),
    message: Option<String>,
}

impl DemoScene {
    pub fn new(fonts: FontChain<RgbaImage>, layout: Layout, message: Option<String>) -> Self {
        let fonts = Rc::new(fonts);
        let mut console = Console::new();
        console.set_font(&fonts);
        console.set_pos(layout.cell_w, layout.cell_h);
        console.set_size(
            layout.width() - layout.cell_w * 2,
            layout.height() - layout.cell_h * 2,
        );
        console.set_cell(layout.cell_w, layout.cell_h);
        console.set_fg(Color::rgb(0xFF, 0xFF, 0));
        console.set_bg(Color::rgb(0, 0xFF, 0xFF));
        Self {
            _fonts: fonts,
            console,
            layout,
            pointer: (0, 0),
            message,
        }
    }

    fn queue(&mut self) {
        self.console.cls();
        self.console
            .print(RULER, Placement::Coord(0, 0), PrintOptions::empty());
        self.console
            .print("ABCDE", Placement::Cursor, PrintOptions::INVERSE);
        if let Some(message) = &self.message {
            let (_, rows) = self.grid();
            self.console.print(
                message.clone(),
                Placement::Coord(0, rows - 1),
                PrintOptions::FILL_CELL_BG,
            );
        }
    }

    /// Console size in cells.
    fn grid(&self) -> (i32, i32) {
        let rect = self.console.rect();
        let p = self.console.real_to_grid(rect.w, rect.h);
        (p.x, p.y)
    }
}

impl Scene for DemoScene {
    fn update(&mut self, _dt: f32) {
        self.queue();
    }

    fn draw(&mut self, canvas: &mut Canvas) {
        canvas.clear(BACKDROP);
        self.console.flush(canvas);

        let (x, y) = self.pointer;
        self.console
            .write_at(canvas, x, y, GREETING, PrintOptions::empty());

        let Layout { cell_w, cell_h, .. } = self.layout;
        let block = Rect::new(
            self.layout.width() - 6 * cell_w - 1,
            5 * cell_h - 1,
            self.layout.width(),
            self.layout.height(),
        );
        self.console
            .write_in(canvas, block, "1234567890ABCDEFG", PrintOptions::empty());
    }

    fn on_event(&mut self, event: &ShellEvent) {
        match *event {
            ShellEvent::PointerMoved {
                logical: Some(pos), ..
            } => self.pointer = pos,
            ShellEvent::Resized { width, height } => {
                debug!("demo: window now {width}x{height}");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout {
            cell_w: 8,
            cell_h: 8,
            cols: 40,
            rows: 25,
        }
    }

    #[test]
    fn console_is_inset_by_one_cell() {
        let scene = DemoScene::new(FontChain::new(), layout(), None);
        assert_eq!(scene.console.rect(), Rect::new(8, 8, 304, 184));
        assert_eq!(scene.grid(), (38, 23));
    }

    #[test]
    fn queue_does_not_accumulate() {
        let mut scene = DemoScene::new(FontChain::new(), layout(), Some("hi".into()));
        scene.update(0.016);
        scene.update(0.016);
        assert_eq!(scene.console.entries().len(), 3);
        assert_eq!(
            scene.console.entries()[2].placement,
            Placement::Coord(0, 22)
        );
    }

    #[test]
    fn pointer_follows_logical_position() {
        let mut scene = DemoScene::new(FontChain::new(), layout(), None);
        scene.on_event(&ShellEvent::PointerMoved {
            window: (100, 100),
            logical: Some((50, 40)),
        });
        assert_eq!(scene.pointer, (50, 40));
        scene.on_event(&ShellEvent::PointerMoved {
            window: (0, 0),
            logical: None,
        });
        assert_eq!(scene.pointer, (50, 40));
    }

    #[test]
    fn draw_fills_console_over_backdrop() {
        let mut scene = DemoScene::new(FontChain::new(), layout(), None);
        let mut canvas = Canvas::new(320, 200);
        scene.update(0.0);
        scene.draw(&mut canvas);
        assert_eq!(canvas.pixel(0, 0), Some(BACKDROP));
        assert_eq!(canvas.pixel(8, 8), Some(Color::rgb(0, 0xFF, 0xFF)));
        assert_eq!(canvas.pixel(311, 191), Some(Color::rgb(0, 0xFF, 0xFF)));
        assert_eq!(canvas.pixel(312, 192), Some(BACKDROP));
    }
}
