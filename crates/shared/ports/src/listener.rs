use kotoshi_core::TimeSnapshot;

/// Port for snapshot consumers
///
/// Any `Fn(&TimeSnapshot) + Send + Sync` closure is a listener, so most
/// callers never implement this by hand.
pub trait SnapshotListener: Send + Sync {
    fn on_snapshot(&self, snapshot: &TimeSnapshot);
}

impl<F> SnapshotListener for F
where
    F: Fn(&TimeSnapshot) + Send + Sync,
{
    fn on_snapshot(&self, snapshot: &TimeSnapshot) {
        self(snapshot)
    }
}
