//! Print loop
//!
//! The engine ticks at its own cadence; this loop samples the latest
//! snapshot from the engine's watch channel at the print interval, so a
//! fast tick rate never floods the terminal.

use kotoshi_clock::{Clock, ShiftedClock, SystemClock};
use kotoshi_core::{Timestamp, TimeSnapshot};
use kotoshi_engine::{Result, Subscription, TimeEngine};
use log::info;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;
use tokio::time::{interval, sleep};

use crate::config::RunnerSettings;
use crate::report::render;

/// System clock, optionally shifted so it reads `start_at` right now
pub fn build_clock(start_at: Option<Timestamp>) -> Arc<dyn Clock> {
    let system: Arc<dyn Clock> = Arc::new(SystemClock::new());
    match start_at {
        Some(start) => Arc::new(ShiftedClock::starting_at(system, start)),
        None => system,
    }
}

/// Call `greet` with the new year each time the engine's year changes
///
/// The year current at subscription time is not reported.
pub fn on_new_year<F>(engine: &TimeEngine, greet: F) -> Subscription
where
    F: Fn(i32) + Send + Sync + 'static,
{
    let current_year = AtomicI32::new(engine.get_snapshot().year);
    engine.subscribe(move |snapshot: &TimeSnapshot| {
        let previous = current_year.swap(snapshot.year, Ordering::Relaxed);
        if previous != snapshot.year {
            greet(snapshot.year);
        }
    })
}

/// Log a greeting whenever the engine's year changes
pub fn log_new_year(engine: &TimeEngine) -> Subscription {
    on_new_year(engine, |year| info!("Happy New Year {}!", year))
}

/// Print snapshots until `settings.run_for` elapses or `shutdown` resolves
///
/// The engine is expected to be started by the caller; if it is not, the
/// same snapshot is printed every time.
pub async fn run<W, F>(
    engine: &TimeEngine,
    settings: &RunnerSettings,
    out: &mut W,
    shutdown: F,
) -> Result<()>
where
    W: Write,
    F: Future<Output = ()>,
{
    let mut snapshots = engine.watch();
    let mut printer = interval(settings.print_interval);

    let deadline = sleep_or_forever(settings.run_for);
    tokio::pin!(deadline);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = printer.tick() => {
                let snapshot = *snapshots.borrow_and_update();
                writeln!(out, "{}", render(&snapshot, settings.output)?)?;
                out.flush()?;
            }
            _ = &mut deadline => {
                info!("Run time elapsed");
                break;
            }
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
        }
    }

    Ok(())
}

async fn sleep_or_forever(duration: Option<Duration>) {
    match duration {
        Some(duration) => sleep(duration).await,
        None => std::future::pending().await,
    }
}
