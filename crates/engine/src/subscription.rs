//! Subscriber bookkeeping
//!
//! Listeners are kept in registration order and notified in that order.
//! Each delivery is isolated: a listener that panics is logged and skipped,
//! the rest still receive the snapshot.

use kotoshi_core::TimeSnapshot;
use kotoshi_ports::SnapshotListener;
use log::{debug, error};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use uuid::Uuid;

/// Identifier of one registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

type Entry = (SubscriptionId, Arc<dyn SnapshotListener>);

/// Ordered set of listeners
pub(crate) struct SubscriberRegistry {
    entries: Mutex<Vec<Entry>>,
}

impl SubscriberRegistry {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn insert(self: &Arc<Self>, listener: Arc<dyn SnapshotListener>) -> Subscription {
        let id = SubscriptionId::new();
        self.entries().push((id, listener));
        debug!("Subscriber {} registered", id);

        Subscription {
            id,
            registry: Arc::downgrade(self),
            active: AtomicBool::new(true),
        }
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        before != entries.len()
    }

    fn contains(&self, id: SubscriptionId) -> bool {
        self.entries().iter().any(|(entry_id, _)| *entry_id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }

    /// Deliver `snapshot` to every listener, in registration order
    ///
    /// The registry lock is released while listeners run, so a listener
    /// may unsubscribe itself or others. A listener removed during the pass
    /// is not called afterwards.
    pub(crate) fn notify(&self, snapshot: &TimeSnapshot) {
        let listeners: Vec<Entry> = self.entries().clone();
        for (id, listener) in &listeners {
            if self.contains(*id) {
                Self::deliver(*id, listener.as_ref(), snapshot);
            }
        }
    }

    pub(crate) fn deliver(
        id: SubscriptionId,
        listener: &dyn SnapshotListener,
        snapshot: &TimeSnapshot,
    ) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener.on_snapshot(snapshot)));
        if outcome.is_err() {
            error!("Subscriber {} panicked while handling a snapshot", id);
        }
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle returned by `TimeEngine::subscribe`
///
/// Dropping the handle leaves the listener registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it.
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<SubscriberRegistry>,
    active: AtomicBool,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the listener. Calling this again is a no-op.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            if registry.remove(self.id) {
                debug!("Subscriber {} removed", self.id);
            }
        }
    }

    /// Whether the listener still receives snapshots
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire) && self.registry.strong_count() > 0
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
