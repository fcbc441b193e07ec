//! Panel window backed by `minifb`.
//!
//! The `minifb` window is not `Send`, so it lives on its own thread. Frames
//! are handed over through a single-slot [`AtomicCell`]; a newer frame
//! replaces one the window thread has not picked up yet. Closing the window
//! raises the quit signal.
//!
//! Some platforms (macOS) only allow windows on the main thread; this
//! backend targets X11/Wayland on the rover.

use crate::framebuffer::Framebuffer;
use crossbeam::atomic::AtomicCell;
use crossbeam::channel;
use minifb::{Window, WindowOptions};
use rover_common::config::DisplayConfig;
use rover_common::hal::driver::{DisplaySurface, HalError};
use rover_common::hal::types::Rgb;
use rover_common::signal::QuitSignal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info};

/// Window event pump interval.
const PUMP_INTERVAL: Duration = Duration::from_millis(10);

type FrameSlot = Arc<AtomicCell<Option<Vec<u32>>>>;

/// Display surface presenting into a desktop window.
pub struct WindowDisplay {
    framebuffer: Framebuffer,
    slot: FrameSlot,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl WindowDisplay {
    /// Open the window and wait for it to come up.
    ///
    /// # Errors
    /// `HalError::InitFailed` if the window cannot be created.
    pub fn open(config: &DisplayConfig, quit: &QuitSignal) -> Result<Self, HalError> {
        let (width, height) = (config.width as usize, config.height as usize);
        let caption = config.caption.clone();
        let slot: FrameSlot = Arc::new(AtomicCell::new(None));
        let stop = Arc::new(AtomicBool::new(false));
        let (init_tx, init_rx) = channel::bounded::<Result<(), String>>(1);

        let thread = {
            let slot = slot.clone();
            let stop = stop.clone();
            let quit = quit.clone();
            thread::Builder::new()
                .name("panel-window".to_string())
                .spawn(move || {
                    let mut window =
                        match Window::new(&caption, width, height, WindowOptions::default()) {
                            Ok(window) => {
                                let _ = init_tx.send(Ok(()));
                                window
                            }
                            Err(e) => {
                                let _ = init_tx.send(Err(e.to_string()));
                                return;
                            }
                        };
                    let mut buffer = vec![Rgb::WHITE.to_0rgb(); width * height];

                    while !stop.load(Ordering::Acquire) {
                        if !window.is_open() {
                            info!("Panel window closed by operator");
                            quit.raise();
                            break;
                        }
                        if let Some(frame) = slot.take() {
                            buffer = frame;
                        }
                        if let Err(e) = window.update_with_buffer(&buffer, width, height) {
                            error!("Panel window update failed: {e}");
                            quit.raise();
                            break;
                        }
                        thread::sleep(PUMP_INTERVAL);
                    }
                    debug!("Panel window thread exiting");
                })
                .map_err(|e| HalError::InitFailed(format!("window thread: {e}")))?
        };

        match init_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = thread.join();
                return Err(HalError::InitFailed(format!("window: {e}")));
            }
            Err(_) => {
                let _ = thread.join();
                return Err(HalError::InitFailed("window thread died".to_string()));
            }
        }
        info!(width, height, caption = %config.caption, "Panel window open");

        Ok(Self {
            framebuffer: Framebuffer::new(config.width, config.height),
            slot,
            stop,
            thread: Some(thread),
        })
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl DisplaySurface for WindowDisplay {
    fn size(&self) -> (u32, u32) {
        (self.framebuffer.width() as u32, self.framebuffer.height() as u32)
    }

    fn fill(&mut self, color: Rgb) {
        self.framebuffer.fill(color);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) {
        self.framebuffer.draw_text(text, x, y, color);
    }

    fn flip(&mut self) -> Result<(), HalError> {
        match &self.thread {
            Some(thread) if !thread.is_finished() => {
                self.slot.store(Some(self.framebuffer.pixels().to_vec()));
                Ok(())
            }
            _ => Err(HalError::Unavailable("panel window closed".to_string())),
        }
    }

    fn close(&mut self) -> Result<(), HalError> {
        self.shutdown();
        Ok(())
    }
}

impl Drop for WindowDisplay {
    fn drop(&mut self) {
        self.shutdown();
    }
}
