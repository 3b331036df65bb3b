//! Bitmap store abstraction and connection management.
//!
//! The storage engine itself is an external collaborator. This module pins
//! down the small call contract the crate relies on and the machinery for
//! acquiring a bound client:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application code                                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  EventTracker (tracker.rs) - date coercion + delegation  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  BitmapStore trait (bitmap.rs) - mark / combine_range    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  MemoryStore (memory.rs) - in-memory, tests and local    │
//! │  dev; real engines plug in behind the same trait         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Connections are named: a [`StoreRegistry`] maps connection names to store
//! handles, built directly or from a [`TrackingConfig`] TOML file via the
//! [`StoreFactory`].

pub mod bitmap;
pub mod config;
pub mod factory;
pub mod memory;
pub mod registry;

pub use bitmap::BitmapStore;
pub use config::{ConnectionSettings, TrackingConfig, TrackingSettings};
pub use factory::{BackendKind, StoreFactory};
pub use memory::{MarkCall, MemoryStore};
pub use registry::{StoreHandle, StoreRegistry};
