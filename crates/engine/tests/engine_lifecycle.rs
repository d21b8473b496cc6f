//! Time Engine Lifecycle Integration Tests
//!
//! Exercises the engine the way a front-end would:
//! - subscribing before and after start
//! - starting and stopping the tick loop (repeatedly)
//! - unsubscribing, including from inside a callback
//! - consuming the watch channel

use chrono::Duration as ChronoDuration;
use kotoshi_clock::ManualClock;
use kotoshi_core::Timestamp;
use kotoshi_engine::{EngineConfig, Subscription, TimeEngine, TimeSnapshot};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn utc(iso: &str) -> Timestamp {
    iso.parse().unwrap()
}

fn engine_with(start: &str, tick_ms: u64) -> (Arc<ManualClock>, TimeEngine) {
    let _ = env_logger::builder().is_test(true).try_init();

    let clock = Arc::new(ManualClock::new(utc(start)));
    let config = EngineConfig::new().with_tick_interval(Duration::from_millis(tick_ms));
    let engine = TimeEngine::new(clock.clone(), config);
    (clock, engine)
}

fn counter(engine: &TimeEngine) -> (Arc<AtomicUsize>, Subscription) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let sub = engine.subscribe(move |_: &TimeSnapshot| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (count, sub)
}

fn explode(_: &TimeSnapshot) {
    panic!("listener failure");
}

/// A late subscriber gets the current snapshot immediately, no start needed
#[test]
fn test_subscribe_replays_latest_snapshot() {
    let (_, engine) = engine_with("2024-12-31T15:00:00Z", 16);

    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    let _sub = engine.subscribe(move |snap: &TimeSnapshot| sink.lock().unwrap().push(*snap));

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0], engine.get_snapshot());
    assert_eq!(received[0].year, 2025);
    assert!(!engine.is_running());
}

/// Without a runtime, start is a no-op and the engine stays usable
#[test]
fn test_start_outside_runtime_is_noop() {
    let (clock, engine) = engine_with("2025-04-01T00:00:00Z", 16);

    assert!(!engine.start());
    assert!(!engine.is_running());

    clock.advance(ChronoDuration::days(1));
    let snap = engine.tick();
    assert_eq!(engine.get_snapshot(), snap);

    engine.stop();
    engine.stop();
}

#[test]
fn test_stop_before_start() {
    let (_, engine) = engine_with("2025-04-01T00:00:00Z", 16);
    engine.stop();
    assert!(!engine.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_double_start_runs_one_loop() {
    let (_, engine) = engine_with("2025-04-01T00:00:00Z", 10);
    let (count, _sub) = counter(&engine);
    assert_eq!(count.load(Ordering::SeqCst), 1);

    assert!(engine.start());
    assert!(engine.start());
    assert!(engine.is_running());

    tokio::time::sleep(Duration::from_millis(95)).await;

    // one loop ticks at 0, 10, ..., 90; two loops would double that
    let ticks = count.load(Ordering::SeqCst) - 1;
    assert!((9..=11).contains(&ticks), "ticks = {ticks}");
}

#[tokio::test(start_paused = true)]
async fn test_stop_halts_ticks() {
    let (_, engine) = engine_with("2025-04-01T00:00:00Z", 10);
    let (count, _sub) = counter(&engine);

    engine.start();
    tokio::time::sleep(Duration::from_millis(35)).await;
    engine.stop();
    engine.stop();
    assert!(!engine.is_running());

    let after_stop = count.load(Ordering::SeqCst);
    assert!(after_stop > 1);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(count.load(Ordering::SeqCst), after_stop);
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_stop() {
    let (_, engine) = engine_with("2025-04-01T00:00:00Z", 10);
    let (count, _sub) = counter(&engine);

    engine.start();
    engine.stop();
    assert!(engine.start());

    tokio::time::sleep(Duration::from_millis(25)).await;
    assert!(count.load(Ordering::SeqCst) > 1);
}

/// Ticks follow the clock across a year boundary
#[tokio::test(start_paused = true)]
async fn test_ticks_follow_clock_into_new_year() {
    let (clock, engine) = engine_with("2025-12-31T14:59:59.990Z", 10);
    let mut rx = engine.watch();
    assert_eq!(rx.borrow_and_update().year, 2025);

    engine.start();
    clock.set(utc("2025-12-31T15:00:00Z"));
    rx.changed().await.unwrap();

    let snap = *rx.borrow_and_update();
    assert_eq!(snap.year, 2026);
    assert_eq!(snap.elapsed_ms, 0);
    assert_eq!(snap.total_ms, 365 * 86_400_000);
    assert_eq!(engine.get_snapshot(), snap);
}

#[test]
fn test_listeners_notified_in_registration_order() {
    let (_, engine) = engine_with("2025-04-01T00:00:00Z", 16);
    let order = Arc::new(Mutex::new(Vec::new()));

    let mut subs = Vec::new();
    for name in ["first", "second", "third"] {
        let order = Arc::clone(&order);
        subs.push(engine.subscribe(move |_: &TimeSnapshot| order.lock().unwrap().push(name)));
    }
    order.lock().unwrap().clear();

    engine.tick();
    assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn test_unsubscribe_is_idempotent() {
    let (_, engine) = engine_with("2025-04-01T00:00:00Z", 16);
    let (count, sub) = counter(&engine);
    assert_eq!(engine.subscriber_count(), 1);

    sub.unsubscribe();
    sub.unsubscribe();
    assert!(!sub.is_active());
    assert_eq!(engine.subscriber_count(), 0);

    engine.tick();
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unsubscribe_from_inside_callback() {
    let (_, engine) = engine_with("2025-04-01T00:00:00Z", 16);
    let calls = Arc::new(AtomicUsize::new(0));
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

    let seen = Arc::clone(&calls);
    let own = Arc::clone(&slot);
    let sub = engine.subscribe(move |_: &TimeSnapshot| {
        seen.fetch_add(1, Ordering::SeqCst);
        if let Some(sub) = own.lock().unwrap().as_ref() {
            sub.unsubscribe();
        }
    });
    *slot.lock().unwrap() = Some(sub);

    engine.tick();
    engine.tick();

    // replay + first tick, then gone
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(engine.subscriber_count(), 0);
}

#[test]
fn test_panicking_listener_is_isolated() {
    let (clock, engine) = engine_with("2025-04-01T00:00:00Z", 16);
    let _bad = engine.subscribe(explode);
    let (count, _good) = counter(&engine);

    clock.advance(ChronoDuration::hours(1));
    let snap = engine.tick();

    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(engine.get_snapshot(), snap);
    assert_eq!(engine.subscriber_count(), 2);
}

#[test]
fn test_watch_sees_manual_ticks() {
    let (clock, engine) = engine_with("2025-04-01T00:00:00Z", 16);
    let mut rx = engine.watch();
    assert_eq!(*rx.borrow_and_update(), engine.get_snapshot());

    clock.advance(ChronoDuration::days(2));
    let snap = engine.tick();

    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), snap);
}

/// Dropping the engine ends the loop and closes the channel
#[tokio::test(start_paused = true)]
async fn test_drop_stops_loop() {
    let (_, engine) = engine_with("2025-04-01T00:00:00Z", 10);
    let mut rx = engine.watch();
    engine.start();
    drop(engine);

    let closed = tokio::time::timeout(Duration::from_secs(1), async {
        while rx.changed().await.is_ok() {}
    })
    .await;
    assert!(closed.is_ok(), "tick loop outlived its engine");
}
