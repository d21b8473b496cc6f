use chrono::Duration;
use kotoshi_core::Timestamp;
use kotoshi_ports::Clock;
use std::sync::Arc;

/// Another clock moved by a fixed offset
///
/// Time keeps flowing at the base clock's rate, it just reads `shift`
/// ahead (positive) or behind (negative).
pub struct ShiftedClock {
    base: Arc<dyn Clock>,
    shift: Duration,
}

impl ShiftedClock {
    pub fn new(base: Arc<dyn Clock>, shift: Duration) -> Self {
        Self { base, shift }
    }

    /// Shift chosen so that the clock reads `start` right now
    pub fn starting_at(base: Arc<dyn Clock>, start: Timestamp) -> Self {
        let shift = start - base.now();
        Self::new(base, shift)
    }

    pub fn shift(&self) -> Duration {
        self.shift
    }
}

impl Clock for ShiftedClock {
    fn now(&self) -> Timestamp {
        let now = self.base.now();
        now.checked_add_signed(self.shift).unwrap_or(now)
    }

    fn name(&self) -> &str {
        "ShiftedClock"
    }
}
