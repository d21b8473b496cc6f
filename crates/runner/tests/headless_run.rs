//! Headless Run Integration Test
//!
//! Runs the print loop against a manual clock with tokio's paused time, so
//! the number and content of printed lines are deterministic.

use clap::Parser;
use kotoshi_clock::ManualClock;
use kotoshi_engine::TimeEngine;
use kotoshi_runner::{Cli, RunnerConfigFile, RunnerSettings, log_new_year, on_new_year, run};
use std::sync::{Arc, Mutex};

fn settings(args: &[&str]) -> RunnerSettings {
    let cli = Cli::try_parse_from(std::iter::once("kotoshi").chain(args.iter().copied())).unwrap();
    RunnerSettings::from_parts(RunnerConfigFile::default(), &cli).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_prints_until_run_time_elapses() {
    let clock = Arc::new(ManualClock::new("2025-06-30T15:00:00Z".parse().unwrap()));
    let settings = settings(&["--output", "json", "--for", "2500", "--print-ms", "1000"]);
    let engine = TimeEngine::new(clock, settings.engine.clone());
    engine.start();

    let mut out = Vec::new();
    run(&engine, &settings, &mut out, std::future::pending())
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    // printed at 0s, 1s and 2s
    assert_eq!(lines.len(), 3);
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["year"], 2025);
        assert_eq!(value["now_local"], "2025-07-01T00:00:00+09:00");
    }
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_future_ends_the_run() {
    let clock = Arc::new(ManualClock::new("2025-06-30T15:00:00Z".parse().unwrap()));
    let settings = settings(&["--print-ms", "1000"]);
    let engine = TimeEngine::new(clock, settings.engine.clone());

    let mut out = Vec::new();
    let shutdown = tokio::time::sleep(std::time::Duration::from_millis(1500));
    run(&engine, &settings, &mut out, shutdown).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.starts_with("2025-07-01 00:00:00 JST | "));
}

#[test]
fn test_new_year_is_reported_once_when_the_year_turns() {
    let clock = Arc::new(ManualClock::new("2025-12-31T14:59:59Z".parse().unwrap()));
    let engine = TimeEngine::with_defaults(clock.clone());

    let years = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&years);
    let sub = on_new_year(&engine, move |year| seen.lock().unwrap().push(year));

    // the replay on registration and later ticks in the same year stay quiet
    engine.tick();
    assert!(years.lock().unwrap().is_empty());

    clock.set("2025-12-31T15:00:01Z".parse().unwrap());
    assert_eq!(engine.tick().year, 2026);
    engine.tick();
    assert_eq!(*years.lock().unwrap(), vec![2026]);

    sub.unsubscribe();
    clock.set("2026-12-31T15:00:00Z".parse().unwrap());
    engine.tick();
    assert_eq!(*years.lock().unwrap(), vec![2026]);
}

#[test]
fn test_new_year_logger_registers_and_unsubscribes() {
    let clock = Arc::new(ManualClock::new("2025-12-31T14:59:59Z".parse().unwrap()));
    let engine = TimeEngine::with_defaults(clock);

    let sub = log_new_year(&engine);
    assert_eq!(engine.subscriber_count(), 1);

    sub.unsubscribe();
    assert_eq!(engine.subscriber_count(), 0);
}
