//! Kotoshi Ports
//!
//! Port definitions (traits) for the kotoshi year-progress engine.
//! These define the boundaries between the snapshot engine and whatever
//! supplies time to it or consumes its snapshots.

mod clock;
mod listener;

pub use clock::Clock;
pub use listener::SnapshotListener;
