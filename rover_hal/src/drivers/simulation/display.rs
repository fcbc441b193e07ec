//! Offscreen panel that records every presented frame.

use crate::framebuffer::Framebuffer;
use parking_lot::Mutex;
use rover_common::hal::driver::{DisplaySurface, HalError};
use rover_common::hal::types::Rgb;
use std::collections::VecDeque;
use std::sync::Arc;

/// Presented frames kept for inspection; older frames are dropped.
const FRAME_LIMIT: usize = 1024;

/// One text draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnText {
    /// Left edge [px].
    pub x: i32,
    /// Top edge [px].
    pub y: i32,
    /// Rendered text.
    pub text: String,
}

#[derive(Debug, Default)]
struct DisplayState {
    frames: VecDeque<Vec<DrawnText>>,
    flips: u64,
    fills: u64,
    closed: bool,
    writes_after_close: u64,
    fail_flips: bool,
    last_pixels: Vec<u32>,
}

/// Inspection handle for [`SimulatedDisplay`]. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct DisplayProbe(Arc<Mutex<DisplayState>>);

/// Display surface drawing into a [`Framebuffer`].
pub struct SimulatedDisplay {
    framebuffer: Framebuffer,
    pending: Vec<DrawnText>,
    probe: DisplayProbe,
}

impl SimulatedDisplay {
    /// Create a `width` x `height` surface and its inspection handle.
    pub fn new(width: u32, height: u32) -> (Self, DisplayProbe) {
        let probe = DisplayProbe::default();
        (
            Self {
                framebuffer: Framebuffer::new(width, height),
                pending: Vec::new(),
                probe: probe.clone(),
            },
            probe,
        )
    }

    fn touch(&self) -> bool {
        let mut state = self.probe.0.lock();
        if state.closed {
            state.writes_after_close += 1;
            return false;
        }
        true
    }
}

impl DisplaySurface for SimulatedDisplay {
    fn size(&self) -> (u32, u32) {
        (self.framebuffer.width() as u32, self.framebuffer.height() as u32)
    }

    fn fill(&mut self, color: Rgb) {
        if !self.touch() {
            return;
        }
        self.framebuffer.fill(color);
        self.pending.clear();
        self.probe.0.lock().fills += 1;
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) {
        if !self.touch() {
            return;
        }
        self.framebuffer.draw_text(text, x, y, color);
        self.pending.push(DrawnText {
            x,
            y,
            text: text.to_string(),
        });
    }

    fn flip(&mut self) -> Result<(), HalError> {
        let mut state = self.probe.0.lock();
        if state.closed {
            state.writes_after_close += 1;
            return Err(HalError::Unavailable("display closed".to_string()));
        }
        if state.fail_flips {
            return Err(HalError::CommunicationError(
                "simulated present failure".to_string(),
            ));
        }
        if state.frames.len() == FRAME_LIMIT {
            state.frames.pop_front();
        }
        state.frames.push_back(std::mem::take(&mut self.pending));
        state.last_pixels.clear();
        state.last_pixels.extend_from_slice(self.framebuffer.pixels());
        state.flips += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), HalError> {
        self.probe.0.lock().closed = true;
        Ok(())
    }
}

impl DisplayProbe {
    /// Number of successfully presented frames.
    pub fn flips(&self) -> u64 {
        self.0.lock().flips
    }

    /// Number of clears.
    pub fn fills(&self) -> u64 {
        self.0.lock().fills
    }

    /// Text of the most recent presented frame.
    pub fn last_frame(&self) -> Option<Vec<DrawnText>> {
        self.0.lock().frames.back().cloned()
    }

    /// Recent presented frames, oldest first.
    pub fn frames(&self) -> Vec<Vec<DrawnText>> {
        self.0.lock().frames.iter().cloned().collect()
    }

    /// Pixels of the most recent presented frame.
    pub fn last_pixels(&self) -> Vec<u32> {
        self.0.lock().last_pixels.clone()
    }

    /// Whether the surface was closed.
    pub fn is_closed(&self) -> bool {
        self.0.lock().closed
    }

    /// Draw or present calls made after close. Should stay zero.
    pub fn writes_after_close(&self) -> u64 {
        self.0.lock().writes_after_close
    }

    /// Make subsequent presents fail (or succeed again).
    pub fn set_flip_failure(&self, fail: bool) {
        self.0.lock().fail_flips = fail;
    }
}
