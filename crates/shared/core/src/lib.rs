//! Kotoshi Core Domain
//!
//! Pure domain types for the kotoshi year-progress engine.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! The heart of it is [`compute_snapshot`]: given an instant, it answers
//! "how far through the current year are we" in the reference timezone
//! (Japan Standard Time, a fixed UTC+9 offset).
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use kotoshi_core::compute_snapshot;
//!
//! let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
//! let snapshot = compute_snapshot(now);
//!
//! assert_eq!(snapshot.year, 2024);
//! assert_eq!(snapshot.total_ms, 366 * 86_400_000);
//! ```

pub mod display;
pub mod snapshot;
pub mod values;

// Re-export commonly used types at crate root
pub use display::{DisplayMode, RemainingBreakdown, YearPhase, floor_fixed};
pub use snapshot::{TimeSnapshot, compute_snapshot, truncate_percent};
pub use values::{
    LocalTimestamp, MS_PER_DAY, PERCENT_SCALE, REFERENCE_OFFSET_SECS, Timestamp, reference_offset,
};
