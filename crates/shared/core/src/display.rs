//! Presentation helpers
//!
//! Pure mappings from snapshot fields to the values a front-end shows:
//! a unit breakdown of the remaining time, how much of that breakdown to
//! show at this point in the year, a coarse "phase" of the year, and
//! truncated fixed-point text for the percentage.

use std::fmt;

use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::snapshot::TimeSnapshot;
use crate::values::MS_PER_DAY;

/// Remaining time split into days, hours, minutes, seconds and hundredths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingBreakdown {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    /// Hundredths of a second
    pub centis: u8,
}

impl RemainingBreakdown {
    pub fn from_ms(remaining_ms: u64) -> Self {
        let total_secs = remaining_ms / 1000;
        Self {
            days: remaining_ms / MS_PER_DAY,
            hours: ((total_secs % 86_400) / 3600) as u8,
            minutes: ((total_secs % 3600) / 60) as u8,
            seconds: (total_secs % 60) as u8,
            centis: ((remaining_ms % 1000) / 10) as u8,
        }
    }
}

impl fmt::Display for RemainingBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}:{:02}:{:02}.{:02}",
            self.days, self.hours, self.minutes, self.seconds, self.centis
        )
    }
}

/// How much detail of the remaining time to show
///
/// Detail grows as the year runs out: days only for most of the year,
/// hours in November, minutes in December and everything down to
/// hundredths from December 20th.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayMode {
    Days,
    DaysHours,
    DaysMinutes,
    Full,
}

impl DisplayMode {
    /// Mode for a reference-zone calendar date
    pub fn for_date(month: u32, day: u32) -> Self {
        match (month, day) {
            (12, d) if d >= 20 => DisplayMode::Full,
            (12, _) => DisplayMode::DaysMinutes,
            (11, _) => DisplayMode::DaysHours,
            _ => DisplayMode::Days,
        }
    }

    pub fn for_snapshot(snapshot: &TimeSnapshot) -> Self {
        Self::for_date(snapshot.now_local.month(), snapshot.now_local.day())
    }

    /// Render `breakdown` at this mode's granularity
    pub fn render(&self, breakdown: &RemainingBreakdown) -> String {
        let b = breakdown;
        match self {
            DisplayMode::Days => format!("{}d", b.days),
            DisplayMode::DaysHours => format!("{}d {:02}h", b.days, b.hours),
            DisplayMode::DaysMinutes => format!("{}d {:02}:{:02}", b.days, b.hours, b.minutes),
            DisplayMode::Full => b.to_string(),
        }
    }
}

/// Coarse position in the year, by days remaining
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum YearPhase {
    JustBegun,
    Halfway,
    SecondHalf,
    Closing,
    FinalStretch,
    Finale,
}

impl YearPhase {
    pub fn from_remaining_days(days: u64) -> Self {
        match days {
            300.. => YearPhase::JustBegun,
            200..=299 => YearPhase::Halfway,
            100..=199 => YearPhase::SecondHalf,
            50..=99 => YearPhase::Closing,
            21..=49 => YearPhase::FinalStretch,
            _ => YearPhase::Finale,
        }
    }

    pub fn label(&self, year: i32) -> String {
        match self {
            YearPhase::JustBegun => format!("{year} has only just begun"),
            YearPhase::Halfway => format!("{year} is heading for the halfway mark"),
            YearPhase::SecondHalf => format!("Into the second half of {year}"),
            YearPhase::Closing => format!("{year} is drawing to a close"),
            YearPhase::FinalStretch => format!("The final stretch of {year}"),
            YearPhase::Finale => format!("Make the end of {year} the best part"),
        }
    }
}

/// Fixed-point text of `value`, truncated (never rounded) to `decimals` places
pub fn floor_fixed(value: Decimal, decimals: u32) -> String {
    let mut truncated = value.round_dp_with_strategy(decimals, RoundingStrategy::ToZero);
    truncated.rescale(decimals);
    truncated.to_string()
}
