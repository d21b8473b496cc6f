//! Kotoshi Clock Infrastructure
//!
//! Time sources for the snapshot engine:
//!
//! - [`SystemClock`]: the real wall clock, for production
//! - [`ManualClock`]: frozen time that only moves when told to, for tests
//! - [`ShiftedClock`]: another clock moved by a fixed offset, for previewing
//!   a different moment of the year while time keeps flowing
//!
//! ## Usage
//!
//! ```ignore
//! use kotoshi_clock::{ManualClock, ShiftedClock, SystemClock};
//! use chrono::Duration;
//!
//! // Deterministic time for tests
//! let clock = ManualClock::new("2025-12-31T14:59:59Z".parse()?);
//! clock.advance(Duration::seconds(1));
//!
//! // Live time, starting from New Year's Eve
//! let preview = ShiftedClock::starting_at(Arc::new(SystemClock::new()), eve);
//! ```

mod manual;
mod shifted;
mod system;

pub use manual::ManualClock;
pub use shifted::ShiftedClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use kotoshi_ports::Clock;
