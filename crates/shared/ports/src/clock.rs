use kotoshi_core::{LocalTimestamp, Timestamp, reference_offset};

/// Source of "now" for the year-progress engine
///
/// Implementations report UTC instants; every year boundary is worked out
/// from them in the reference zone. Swapping the clock is how a preview
/// jumps to New Year's Eve or a test freezes time.
pub trait Clock: Send + Sync {
    /// Current instant, in UTC
    fn now(&self) -> Timestamp;

    /// Current instant on the reference-zone wall clock
    fn now_local(&self) -> LocalTimestamp {
        self.now().with_timezone(&reference_offset())
    }

    /// Shown in engine logs
    fn name(&self) -> &str {
        "Clock"
    }
}
