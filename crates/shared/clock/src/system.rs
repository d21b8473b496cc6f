use chrono::Utc;
use kotoshi_core::Timestamp;
use kotoshi_ports::Clock;

/// The host's clock
///
/// The host timezone plays no part: only the UTC instant is read, and the
/// snapshot places it on the Tokyo calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
