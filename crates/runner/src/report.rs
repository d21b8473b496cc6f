//! Snapshot lines for the terminal

use kotoshi_core::{
    DisplayMode, PERCENT_SCALE, RemainingBreakdown, TimeSnapshot, YearPhase, floor_fixed,
};
use serde::Serialize;

use crate::config::OutputFormat;

/// JSON line: the snapshot plus the derived display values
#[derive(Debug, Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    snapshot: &'a TimeSnapshot,
    progress_text: String,
    remaining: RemainingBreakdown,
    display_mode: DisplayMode,
    phase: YearPhase,
}

/// Render one snapshot in the requested format
pub fn render(snapshot: &TimeSnapshot, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(snapshot)),
        OutputFormat::Json => render_json(snapshot),
    }
}

/// `2026-10-16 21:00:00 JST | 79.178082% of 2026 elapsed | 76d left | ...`
pub fn render_text(snapshot: &TimeSnapshot) -> String {
    let mode = DisplayMode::for_snapshot(snapshot);
    let phase = YearPhase::from_remaining_days(snapshot.remaining_days);

    format!(
        "{} JST | {}% of {} elapsed | {} left | {}",
        snapshot.now_local.format("%Y-%m-%d %H:%M:%S"),
        floor_fixed(snapshot.progress_percent, PERCENT_SCALE),
        snapshot.year,
        mode.render(&snapshot.remaining_breakdown()),
        phase.label(snapshot.year),
    )
}

pub fn render_json(snapshot: &TimeSnapshot) -> serde_json::Result<String> {
    let report = Report {
        snapshot,
        progress_text: floor_fixed(snapshot.progress_percent, PERCENT_SCALE),
        remaining: snapshot.remaining_breakdown(),
        display_mode: DisplayMode::for_snapshot(snapshot),
        phase: YearPhase::from_remaining_days(snapshot.remaining_days),
    };
    serde_json::to_string(&report)
}
