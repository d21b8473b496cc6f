use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Timestamp carrying the reference zone's wall-clock fields
pub type LocalTimestamp = DateTime<FixedOffset>;

/// Milliseconds in one calendar day
pub const MS_PER_DAY: u64 = 86_400_000;

/// Offset of the reference timezone (JST) east of UTC, in seconds
pub const REFERENCE_OFFSET_SECS: i32 = 9 * 3600;

/// Number of decimal places kept in `progress_percent`
pub const PERCENT_SCALE: u32 = 6;

/// The fixed reference timezone (Japan Standard Time, UTC+9, no DST)
pub fn reference_offset() -> FixedOffset {
    // east_opt only rejects offsets of a full day or more
    FixedOffset::east_opt(REFERENCE_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}
