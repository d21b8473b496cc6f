//! Year-progress snapshot calculator

use chrono::{DateTime, Datelike, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::display::RemainingBreakdown;
use crate::values::{LocalTimestamp, MS_PER_DAY, PERCENT_SCALE, Timestamp, reference_offset};

/// Year-progress at a single instant, anchored to the reference timezone
///
/// Snapshots are plain values: they are built once by [`compute_snapshot`]
/// and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSnapshot {
    /// The instant, expressed in the reference timezone
    pub now_local: LocalTimestamp,
    /// Midnight of January 1st of the current year (reference zone)
    pub start_of_year: LocalTimestamp,
    /// Midnight of January 1st of the next year (reference zone)
    pub end_of_year: LocalTimestamp,
    /// Wall-clock year of `now_local`
    pub year: i32,
    /// Milliseconds left until `end_of_year`, never negative
    pub remaining_ms: u64,
    /// Milliseconds since `start_of_year`, clamped to `[0, total_ms]`
    pub elapsed_ms: u64,
    /// Length of the current year in milliseconds (365 or 366 days)
    pub total_ms: u64,
    /// `elapsed / total * 100`, truncated to six decimal places
    pub progress_percent: Decimal,
    /// Whole days left in the year
    pub remaining_days: u64,
    /// Whole days already passed in the year
    pub elapsed_days: u64,
    /// True when nothing of the year remains
    pub is_year_boundary: bool,
}

impl TimeSnapshot {
    /// Progress as a float, for consumers that draw bars or gauges
    pub fn progress_percent_f64(&self) -> f64 {
        self.progress_percent.to_f64().unwrap_or(0.0)
    }

    /// Whether the current year has 366 days
    pub fn is_leap_year(&self) -> bool {
        self.total_ms == 366 * MS_PER_DAY
    }

    /// Remaining time split into calendar units
    pub fn remaining_breakdown(&self) -> RemainingBreakdown {
        RemainingBreakdown::from_ms(self.remaining_ms)
    }
}

/// Compute the year-progress snapshot for `now`
///
/// The year is taken from the reference-zone wall clock, not from the UTC
/// date of `now`. The first instant of a year belongs to that year: at
/// local midnight on January 1st, `elapsed_ms` and `progress_percent` are
/// zero and the whole new year remains.
///
/// Sub-millisecond precision of `now` is discarded.
pub fn compute_snapshot(now: Timestamp) -> TimeSnapshot {
    let now_local = now.with_timezone(&reference_offset());
    let year = now_local.year();

    let now_ms = now.timestamp_millis();
    let (start_ms, end_ms) = year_bounds_ms(year, now_ms);
    let start_of_year = local_at(start_ms);
    let end_of_year = local_at(end_ms);

    let total_ms = non_negative(end_ms - start_ms);
    let elapsed_ms = non_negative(now_ms - start_ms).min(total_ms);
    let remaining_ms = non_negative(end_ms - now_ms);

    TimeSnapshot {
        now_local,
        start_of_year,
        end_of_year,
        year,
        remaining_ms,
        elapsed_ms,
        total_ms,
        progress_percent: truncate_percent(elapsed_ms, total_ms),
        remaining_days: remaining_ms / MS_PER_DAY,
        elapsed_days: elapsed_ms / MS_PER_DAY,
        is_year_boundary: remaining_ms == 0,
    }
}

/// `elapsed / total * 100`, clamped to `[0, 100]` and truncated toward zero
/// at [`PERCENT_SCALE`] decimal places
///
/// Integer arithmetic throughout, so 100% is only reported once `elapsed`
/// really reaches `total`. A zero `total` yields 0%.
pub fn truncate_percent(elapsed_ms: u64, total_ms: u64) -> Decimal {
    if total_ms == 0 {
        return Decimal::new(0, PERCENT_SCALE);
    }

    let elapsed = i128::from(elapsed_ms.min(total_ms));
    let scaled = elapsed * 100 * 10_i128.pow(PERCENT_SCALE) / i128::from(total_ms);
    Decimal::from_i128_with_scale(scaled, PERCENT_SCALE)
}

/// Epoch milliseconds of the year's two January 1st midnights
///
/// Near chrono's range limits a midnight may not be representable; it is
/// then derived from the neighbouring midnight and the year's length, so
/// the span is always a whole 365 or 366 days.
fn year_bounds_ms(year: i32, now_ms: i64) -> (i64, i64) {
    let length = year_length_ms(year);
    let start = new_year_midnight(year).map(|t| t.timestamp_millis());
    let end = year
        .checked_add(1)
        .and_then(new_year_midnight)
        .map(|t| t.timestamp_millis());

    match (start, end) {
        (Some(start), Some(end)) => (start, end),
        (Some(start), None) => (start, start + length),
        (None, Some(end)) => (end - length, end),
        (None, None) => {
            let start = year
                .checked_sub(1)
                .and_then(|previous| {
                    new_year_midnight(previous)
                        .map(|t| t.timestamp_millis() + year_length_ms(previous))
                })
                .unwrap_or(now_ms);
            (start, start + length)
        }
    }
}

fn year_length_ms(year: i32) -> i64 {
    let leap = year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0);
    let days: i64 = if leap { 366 } else { 365 };
    days * MS_PER_DAY as i64
}

/// Reference-zone view of `ms`, saturating at chrono's range limits
fn local_at(ms: i64) -> LocalTimestamp {
    let utc = DateTime::from_timestamp_millis(ms).unwrap_or(if ms < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    });
    utc.with_timezone(&reference_offset())
}

fn new_year_midnight(year: i32) -> Option<LocalTimestamp> {
    reference_offset()
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
}

fn non_negative(ms: i64) -> u64 {
    u64::try_from(ms).unwrap_or(0)
}
