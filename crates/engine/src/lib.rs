//! Kotoshi Engine - year-progress update scheduler
//!
//! Wraps the pure snapshot calculator from `kotoshi-core` so callers get a
//! continuously updated snapshot without polling:
//!
//! - **TimeEngine**: owns the latest snapshot, the tick loop and the listeners
//! - **Subscription**: handle that removes a listener again
//! - **EngineConfig**: tick cadence, with a JSON file representation
//!
//! ## Architecture
//!
//! ```text
//!   Clock (system / manual / shifted)
//!         │ now()
//!    ┌────▼─────────────┐      tokio interval
//!    │    TimeEngine    │◄──── or tick() per frame
//!    │ compute_snapshot │
//!    └────┬─────────┬───┘
//!         │         │ watch channel
//!         │         ▼
//!         │    watch::Receiver<TimeSnapshot>
//!         ▼
//!   listeners, in registration order
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use kotoshi_clock::SystemClock;
//! use kotoshi_engine::{EngineConfig, TimeEngine};
//!
//! let engine = TimeEngine::new(Arc::new(SystemClock::new()), EngineConfig::default());
//! let subscription = engine.subscribe(|snap: &TimeSnapshot| {
//!     println!("{}% of {} is gone", snap.progress_percent, snap.year);
//! });
//! engine.start();
//! // ...
//! subscription.unsubscribe();
//! engine.stop();
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod subscription;

// Re-export main types
pub use config::{DEFAULT_TICK_INTERVAL_MS, EngineConfig, EngineConfigFile};
pub use engine::TimeEngine;
pub use error::{EngineError, Result};
pub use subscription::{Subscription, SubscriptionId};

// Re-export the snapshot type for convenience
pub use kotoshi_core::TimeSnapshot;
