//! Bitmap store trait definition.
//!
//! The call contract mirrors the external engine's client surface: argument
//! order and types are preserved so an implementation can delegate verbatim.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::TrackingResult;

/// Abstract bitmap-backed event store.
///
/// Implementations record, per event name and per time bucket, the set of
/// identifiers that performed the event, and combine per-bucket sets across
/// a date range. How marking and combination are realized is entirely the
/// implementation's business; callers hand over fully-resolved timestamps
/// and never see partial state.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait BitmapStore: Send + Sync {
    /// Check if the store connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the connection is healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(TrackingError)` if the check itself failed
    async fn health_check(&self) -> TrackingResult<bool>;

    /// Record that `identifier` performed `event_name` at `timestamp`.
    ///
    /// Every granularity bucket containing `timestamp` is marked.
    ///
    /// # Arguments
    /// * `event_name` - Event being tracked
    /// * `identifier` - Subject that performed the event
    /// * `timestamp` - Resolved occurrence time
    async fn mark(
        &self,
        event_name: &str,
        identifier: u64,
        timestamp: DateTime<Utc>,
    ) -> TrackingResult<()>;

    /// Combine the per-bucket sets for `source_key` across `[from, to]` into
    /// `destination_key`.
    ///
    /// # Arguments
    /// * `source_key` - Event name whose buckets are combined
    /// * `destination_key` - Key receiving the combined set
    /// * `from` - Range start, inclusive
    /// * `to` - Range end, inclusive
    async fn combine_range(
        &self,
        source_key: &str,
        destination_key: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> TrackingResult<()>;
}
