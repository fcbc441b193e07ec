//! Scripted controller.

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use rover_common::hal::driver::{HalError, InputDevice};
use rover_common::hal::types::InputEvent;

/// Controller fed from an [`InputScript`].
pub struct SimulatedInput {
    rx: Receiver<InputEvent>,
    unplug_on_drop: bool,
    released: bool,
}

/// Sending side of a simulated controller. Cheap to clone.
#[derive(Clone)]
pub struct InputScript {
    tx: Sender<InputEvent>,
}

impl SimulatedInput {
    /// Create a controller and its script handle.
    ///
    /// With `unplug_on_drop`, dropping every script handle makes the next
    /// poll fail as if the controller had been unplugged.
    pub fn channel(unplug_on_drop: bool) -> (Self, InputScript) {
        let (tx, rx) = channel::unbounded();
        (
            Self {
                rx,
                unplug_on_drop,
                released: false,
            },
            InputScript { tx },
        )
    }

    /// Whether `release()` was called.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl InputDevice for SimulatedInput {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn poll_event(&mut self) -> Result<Option<InputEvent>, HalError> {
        match self.rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) if self.unplug_on_drop => Err(HalError::Unavailable(
                "simulated controller unplugged".to_string(),
            )),
            Err(TryRecvError::Disconnected) => Ok(None),
        }
    }

    fn release(&mut self) -> Result<(), HalError> {
        self.released = true;
        Ok(())
    }
}

impl InputScript {
    /// Queue an arbitrary event.
    pub fn push(&self, event: InputEvent) {
        // The controller may already be gone; scripted events are then moot.
        let _ = self.tx.send(event);
    }

    /// Queue an axis motion.
    pub fn axis(&self, axis_id: u8, value: f64) {
        self.push(InputEvent::axis(axis_id, value));
    }

    /// Queue a quit.
    pub fn quit(&self) {
        self.push(InputEvent::Quit);
    }
}
