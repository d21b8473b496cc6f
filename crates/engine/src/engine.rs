use kotoshi_core::{TimeSnapshot, compute_snapshot};
use kotoshi_ports::{Clock, SnapshotListener};
use log::{debug, trace, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::config::EngineConfig;
use crate::subscription::{SubscriberRegistry, Subscription};

/// Shortest period the built-in loop will run at
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Keeps a year-progress snapshot up to date and fans it out
///
/// The engine computes its first snapshot on construction, so
/// [`get_snapshot`](Self::get_snapshot) and [`subscribe`](Self::subscribe)
/// work before [`start`](Self::start) is ever called. Once started, a tokio
/// task recomputes the snapshot every `tick_interval` and delivers it to
/// every listener in registration order.
///
/// A presentation surface that renders frames can skip `start` and call
/// [`tick`](Self::tick) once per frame instead.
///
/// There is no global instance: construct one and share it with `Arc`.
/// Dropping the engine stops its loop.
pub struct TimeEngine {
    config: EngineConfig,
    shared: Arc<Shared>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

/// State reachable from the tick loop
struct Shared {
    clock: Arc<dyn Clock>,
    /// Holds the latest snapshot; receivers are the channel view of the stream
    latest: watch::Sender<TimeSnapshot>,
    subscribers: Arc<SubscriberRegistry>,
    /// Serializes ticks and subscribe-replays so listeners never go backwards
    delivery: DeliveryGate,
}

/// Delivery lock that knows which thread holds it
///
/// A listener runs on the thread doing the delivery, so a second `enter`
/// from that thread is a call made from inside a callback. It gets `None`
/// instead of blocking on a lock its own caller holds.
struct DeliveryGate {
    held: Mutex<()>,
    owner: Mutex<Option<ThreadId>>,
}

struct Delivering<'a> {
    gate: &'a DeliveryGate,
    _held: MutexGuard<'a, ()>,
}

impl DeliveryGate {
    fn new() -> Self {
        Self {
            held: Mutex::new(()),
            owner: Mutex::new(None),
        }
    }

    fn enter(&self) -> Option<Delivering<'_>> {
        let current = thread::current().id();
        if *lock(&self.owner) == Some(current) {
            return None;
        }

        let held = lock(&self.held);
        *lock(&self.owner) = Some(current);
        Some(Delivering {
            gate: self,
            _held: held,
        })
    }
}

impl Drop for Delivering<'_> {
    fn drop(&mut self) {
        // runs before `_held` is released
        *lock(&self.gate.owner) = None;
    }
}

impl Shared {
    fn tick(&self) -> TimeSnapshot {
        let Some(_delivery) = self.delivery.enter() else {
            trace!("Tick requested from inside a listener, serving the latest snapshot");
            return *self.latest.borrow();
        };

        let snapshot = compute_snapshot(self.clock.now());
        self.latest.send_replace(snapshot);
        trace!(
            "Tick: year={}, progress={}%, remaining_ms={}",
            snapshot.year, snapshot.progress_percent, snapshot.remaining_ms
        );

        self.subscribers.notify(&snapshot);
        snapshot
    }
}

impl TimeEngine {
    /// Create an engine reading time from `clock`
    pub fn new(clock: Arc<dyn Clock>, config: EngineConfig) -> Self {
        let (latest, _) = watch::channel(compute_snapshot(clock.now()));
        debug!("Time engine created with {} at {}", clock.name(), clock.now_local());

        Self {
            config,
            shared: Arc::new(Shared {
                clock,
                latest,
                subscribers: SubscriberRegistry::new(),
                delivery: DeliveryGate::new(),
            }),
            ticker: Mutex::new(None),
        }
    }

    /// Create an engine with the default configuration
    pub fn with_defaults(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, EngineConfig::default())
    }

    /// Start the recurring tick loop
    ///
    /// Does nothing if the loop is already running. Outside a tokio runtime
    /// there is nothing to drive the loop: the call logs a warning and the
    /// engine keeps serving its last snapshot without updating.
    ///
    /// Returns whether the loop is running after the call.
    pub fn start(&self) -> bool {
        let mut ticker = lock(&self.ticker);
        if ticker.as_ref().is_some_and(|handle| !handle.is_finished()) {
            debug!("Time engine already running");
            return true;
        }

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!("No async runtime available, time engine will not auto-update: {}", e);
                return false;
            }
        };

        let period = self.config.tick_interval.max(MIN_TICK_INTERVAL);
        let shared = Arc::clone(&self.shared);
        *ticker = Some(runtime.spawn(Self::run_ticks(shared, period)));

        debug!("Time engine started, ticking every {:?}", period);
        true
    }

    /// Cancel the tick loop. Safe to call when not running.
    pub fn stop(&self) {
        if let Some(handle) = lock(&self.ticker).take() {
            handle.abort();
            debug!("Time engine stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.ticker)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Compute, store and publish one snapshot now
    ///
    /// Called from inside a listener, it returns the snapshot being
    /// delivered without starting a nested pass.
    pub fn tick(&self) -> TimeSnapshot {
        self.shared.tick()
    }

    /// Register `listener` and hand it the latest snapshot right away
    ///
    /// The initial delivery happens before this returns, so a listener is
    /// never left without a value even if the engine was never started.
    /// A listener may subscribe others from inside its callback; they are
    /// registered at once and join from the next pass.
    pub fn subscribe<L>(&self, listener: L) -> Subscription
    where
        L: SnapshotListener + 'static,
    {
        let _delivery = self.shared.delivery.enter();

        let listener: Arc<dyn SnapshotListener> = Arc::new(listener);
        let subscription = self.shared.subscribers.insert(Arc::clone(&listener));

        let snapshot = *self.shared.latest.borrow();
        SubscriberRegistry::deliver(subscription.id(), listener.as_ref(), &snapshot);

        subscription
    }

    /// The latest snapshot, without recomputing
    pub fn get_snapshot(&self) -> TimeSnapshot {
        *self.shared.latest.borrow()
    }

    /// Channel view of the snapshot stream
    ///
    /// The receiver starts out holding the latest snapshot and sees every
    /// later one (or at least the newest, if it falls behind).
    pub fn watch(&self) -> watch::Receiver<TimeSnapshot> {
        self.shared.latest.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.len()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock_name(&self) -> &str {
        self.shared.clock.name()
    }

    async fn run_ticks(shared: Arc<Shared>, period: Duration) {
        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticks.tick().await;
            shared.tick();
        }
    }
}

impl Drop for TimeEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
