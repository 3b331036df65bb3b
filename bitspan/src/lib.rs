//! Date-bucketed event tracking over a pluggable bitmap store.
//!
//! bitspan records which identifiers performed which events, bucketed by
//! hour, day, ISO week, month, and year, and answers date-range queries by
//! delegating bucket combination to a store backend. The crate owns exactly
//! two concerns:
//!
//! - **Date normalization** ([`time`]): flexible inputs (structured
//!   timestamps or raw strings) coerced once at the API edge, and
//!   granularity-aligned period boundaries whose rounding direction depends
//!   on which end of a range they anchor.
//! - **Delegation** ([`tracker`], [`store`]): an [`EventTracker`] facade
//!   bound to a [`BitmapStore`] client, acquired directly or through a
//!   [`StoreRegistry`] of named connections.
//!
//! The storage engine itself stays external; the in-tree [`MemoryStore`]
//! exists for tests and local development.
//!
//! # Example
//! ```no_run
//! use bitspan::{StoreRegistry, TrackingConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TrackingConfig::from_file("tracking.toml")?;
//!     let registry = StoreRegistry::from_config(&config)?;
//!
//!     let tracker = registry.tracker(None)?;
//!     tracker.mark_event("login", 42, Some("2024-01-01 10:15:00".into())).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod store;
pub mod time;
pub mod tracker;

pub use error::{TrackingError, TrackingResult};
pub use store::{
    BackendKind, BitmapStore, ConnectionSettings, MarkCall, MemoryStore, StoreFactory,
    StoreHandle, StoreRegistry, TrackingConfig, TrackingSettings,
};
pub use time::{DateInput, DatePeriod, Endpoint, EventKey, Granularity, TimeBucket};
pub use tracker::EventTracker;
