//! Window, event pump and fixed 60 Hz frame loop.
//!
//! The driver owns everything platform specific (winit window, pixels
//! surface) plus the software canvas scenes draw into; a [`Scene`] only sees
//! events, frame times and the canvas.
use std::sync::Arc;
use std::time::{Duration, Instant};

use cellfont::{Canvas, DrawTarget};
use log::{debug, error, info};
use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// 60 frames per second.
pub const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// A startup step that failed. Displays as `<step>: <error>`.
#[derive(Debug, Error)]
#[error("{step}: {message}")]
pub struct InitError {
    pub step: &'static str,
    pub message: String,
}

impl InitError {
    pub fn new(step: &'static str, err: impl std::fmt::Display) -> Self {
        Self {
            step,
            message: err.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShellEvent {
    Quit,
    CloseRequested,
    Resized {
        width: u32,
        height: u32,
    },
    /// Pointer in window pixels and, when inside it, in canvas pixels.
    PointerMoved {
        window: (i32, i32),
        logical: Option<(i32, i32)>,
    },
}

pub trait Scene {
    fn update(&mut self, _dt: f32) {}
    fn draw(&mut self, canvas: &mut Canvas);
    fn on_event(&mut self, _event: &ShellEvent) {}
}

#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    /// Window size in logical pixels.
    pub width: u32,
    pub height: u32,
    /// Smallest allowed window, normally the canvas size.
    pub min_width: u32,
    pub min_height: u32,
}

struct Surface {
    window: Arc<Window>,
    pixels: Pixels<'static>,
}

pub struct FrameDriver<S> {
    config: WindowConfig,
    canvas: Canvas,
    scene: S,
    surface: Option<Surface>,
    last_frame: Instant,
    next_frame: Instant,
    error: Option<InitError>,
}

impl<S: Scene> FrameDriver<S> {
    pub fn new(config: WindowConfig, canvas: Canvas, scene: S) -> Self {
        let now = Instant::now();
        Self {
            config,
            canvas,
            scene,
            surface: None,
            last_frame: now,
            next_frame: now,
            error: None,
        }
    }

    /// Run until the window closes.
    pub fn run(mut self) -> Result<(), InitError> {
        let event_loop = EventLoop::new().map_err(|e| InitError::new("event loop", e))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut self)
            .map_err(|e| InitError::new("event loop", e))?;
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn create_surface(&self, event_loop: &ActiveEventLoop) -> Result<Surface, InitError> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_min_inner_size(LogicalSize::new(
                self.config.min_width,
                self.config.min_height,
            ))
            .with_resizable(true);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| InitError::new("window", e))?,
        );
        let size = window.inner_size();
        let texture = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let pixels = Pixels::new(self.canvas.width(), self.canvas.height(), texture)
            .map_err(|e| InitError::new("renderer", e))?;
        Ok(Surface { window, pixels })
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.next_frame = now + FRAME_TIME;

        self.scene.update(dt);
        self.scene.draw(&mut self.canvas);
        self.canvas.present();

        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.pixels.frame_mut().copy_from_slice(self.canvas.frame());
        if let Err(err) = surface.pixels.render() {
            error!("shell: present failed: {err}");
            event_loop.exit();
        }
    }
}

impl<S: Scene> ApplicationHandler for FrameDriver<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }
        match self.create_surface(event_loop) {
            Ok(surface) => {
                info!(
                    "shell: window {}x{}, canvas {}x{}",
                    self.config.width,
                    self.config.height,
                    self.canvas.width(),
                    self.canvas.height()
                );
                surface.window.request_redraw();
                self.surface = Some(surface);
            }
            Err(err) => {
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.scene.on_event(&ShellEvent::CloseRequested);
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(surface) = self.surface.as_mut() {
                    if let Err(err) = surface.pixels.resize_surface(size.width, size.height) {
                        error!("shell: resize failed: {err}");
                        event_loop.exit();
                        return;
                    }
                }
                debug!("shell: resized to {}x{}", size.width, size.height);
                self.scene.on_event(&ShellEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = self.surface.as_ref().and_then(|s| {
                    s.pixels
                        .window_pos_to_pixel((position.x as f32, position.y as f32))
                        .ok()
                        .map(|(x, y)| (x as i32, y as i32))
                });
                self.scene.on_event(&ShellEvent::PointerMoved {
                    window: (position.x as i32, position.y as i32),
                    logical,
                });
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if Instant::now() >= self.next_frame {
            if let Some(surface) = &self.surface {
                surface.window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.scene.on_event(&ShellEvent::Quit);
        info!("shell: exiting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_error_is_one_line() {
        let err = InitError::new("window", "no display");
        assert_eq!(err.to_string(), "window: no display");
    }

    #[test]
    fn frame_budget_is_sixty_hz() {
        assert_eq!(FRAME_TIME.as_micros(), 16_666);
    }
}
