//! Offscreen panel used when no window system is compiled in.

use crate::framebuffer::Framebuffer;
use rover_common::hal::driver::{DisplaySurface, HalError};
use rover_common::hal::types::Rgb;
use tracing::{debug, trace};

/// Display surface that renders into memory and discards the result.
#[derive(Debug)]
pub struct HeadlessDisplay {
    framebuffer: Framebuffer,
    frames: u64,
    closed: bool,
}

impl HeadlessDisplay {
    /// Create a `width` x `height` surface.
    pub fn new(width: u32, height: u32) -> Self {
        debug!(width, height, "Headless panel created");
        Self {
            framebuffer: Framebuffer::new(width, height),
            frames: 0,
            closed: false,
        }
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl DisplaySurface for HeadlessDisplay {
    fn size(&self) -> (u32, u32) {
        (self.framebuffer.width() as u32, self.framebuffer.height() as u32)
    }

    fn fill(&mut self, color: Rgb) {
        self.framebuffer.fill(color);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) {
        trace!(x, y, text, "panel text");
        self.framebuffer.draw_text(text, x, y, color);
    }

    fn flip(&mut self) -> Result<(), HalError> {
        if self.closed {
            return Err(HalError::Unavailable("headless panel closed".to_string()));
        }
        self.frames += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), HalError> {
        debug!(frames = self.frames, "Headless panel closed");
        self.closed = true;
        Ok(())
    }
}
