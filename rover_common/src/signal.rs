//! Cross-thread shutdown primitives.
//!
//! - [`RunFlag`] - one-shot flag lowered when the control loop stops; read
//!   by both loops every iteration.
//! - [`QuitSignal`] - latch raised from outside the control thread (signal
//!   handler, window close) asking the control loop to stop.
//!
//! Both are single atomics behind an `Arc`; clones observe the same state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Monotonic run/shutdown flag.
///
/// True at construction, lowered exactly once, never raised again.
#[derive(Debug, Clone)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    /// Create a raised flag.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Whether the system is still running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Lower the flag.
    ///
    /// Returns `true` for the call that actually lowered it, `false` if it
    /// was already down.
    pub fn lower(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Latched quit request.
#[derive(Debug, Clone, Default)]
pub struct QuitSignal(Arc<AtomicBool>);

impl QuitSignal {
    /// Create an unraised signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. Safe to call from signal handlers and any thread.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether shutdown was requested.
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
