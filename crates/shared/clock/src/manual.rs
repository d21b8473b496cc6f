use chrono::Duration;
use kotoshi_core::Timestamp;
use kotoshi_ports::Clock;
use std::sync::{PoisonError, RwLock};

/// Clock that only moves when explicitly told to
///
/// Tests use it to put the engine at exact instants such as the last
/// millisecond of a year.
pub struct ManualClock {
    current: RwLock<Timestamp>,
}

impl ManualClock {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Move time forward (or backward, for a negative duration)
    ///
    /// A step that would leave chrono's representable range is ignored.
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = current.checked_add_signed(duration) {
            *current = next;
        }
    }

    /// Jump to an exact instant
    pub fn set(&self, time: Timestamp) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
