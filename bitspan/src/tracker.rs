//! Event-tracking facade.
//!
//! [`EventTracker`] is the public entry point for recording and querying
//! events: it coerces flexible date arguments into concrete UTC timestamps,
//! then delegates to the bound [`BitmapStore`]. It holds no state beyond the
//! store handle captured at construction, and it never invokes the store
//! with partially-resolved arguments: date resolution failures abort before
//! any delegation.

use std::sync::Arc;

use chrono::Utc;
use log::debug;

use crate::error::TrackingResult;
use crate::store::BitmapStore;
use crate::time::{DateInput, DatePeriod, Endpoint, EventKey, Granularity, TimeBucket};

/// Date-bucketed event tracking over a bitmap store.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use bitspan::{EventTracker, MemoryStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let tracker = EventTracker::new(Arc::new(MemoryStore::new()));
///
///     tracker
///         .mark_event("login", 42, Some("2024-01-01 10:15:00".into()))
///         .await?
///         .mark_event("login", 43, None)
///         .await?;
///
///     tracker
///         .combine_date_range("login", "login:january", "2024-01-01".into(), "2024-01-31".into())
///         .await?;
///     Ok(())
/// }
/// ```
pub struct EventTracker {
    store: Arc<dyn BitmapStore>,
}

impl EventTracker {
    /// Create a tracker bound to a store client.
    pub fn new(store: Arc<dyn BitmapStore>) -> Self {
        Self { store }
    }

    /// The bound store client.
    pub fn store(&self) -> &Arc<dyn BitmapStore> {
        &self.store
    }

    /// Record that `identifier` performed `event_name`.
    ///
    /// # Arguments
    /// * `event_name` - Event being tracked
    /// * `identifier` - Subject that performed the event
    /// * `when` - Occurrence time; `None` means now
    ///
    /// # Returns
    /// `Ok(&Self)` for call chaining, or the resolution/store error.
    pub async fn mark_event(
        &self,
        event_name: &str,
        identifier: u64,
        when: Option<DateInput>,
    ) -> TrackingResult<&Self> {
        let timestamp = match when {
            Some(input) => input.resolve()?,
            None => Utc::now(),
        };
        debug!("Marking '{}' for {} at {}", event_name, identifier, timestamp);
        self.store.mark(event_name, identifier, timestamp).await?;
        Ok(self)
    }

    /// Combine the buckets for `source_key` across a date range into
    /// `destination_key`.
    ///
    /// Both dates are resolved before the store is touched; how the store
    /// combines the buckets is its own business.
    pub async fn combine_date_range(
        &self,
        source_key: &str,
        destination_key: &str,
        from: DateInput,
        to: DateInput,
    ) -> TrackingResult<&Self> {
        let from = from.resolve()?;
        let to = to.resolve()?;
        debug!("Combining '{}' into '{}' for {}..{}", source_key, destination_key, from, to);
        self.store.combine_range(source_key, destination_key, from, to).await?;
        Ok(self)
    }

    /// Granularity-aligned period for a date range endpoint, with raw date
    /// strings coerced first.
    pub fn period_for(
        &self,
        granularity: Granularity,
        from: DateInput,
        to: DateInput,
        endpoint: Endpoint,
    ) -> TrackingResult<DatePeriod> {
        Ok(DatePeriod::for_range(granularity, from.resolve()?, to.resolve()?, endpoint))
    }

    /// The event-scoped bucket key for a point in time; `None` means now.
    pub fn bucket(
        &self,
        granularity: Granularity,
        event_name: &str,
        when: Option<DateInput>,
    ) -> TrackingResult<EventKey> {
        let timestamp = match when {
            Some(input) => input.resolve()?,
            None => Utc::now(),
        };
        Ok(EventKey::new(event_name, TimeBucket::new(granularity, timestamp)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackingError;
    use crate::store::MemoryStore;
    use chrono::{DateTime, Duration, TimeZone};

    fn tracker_with_store() -> (EventTracker, MemoryStore) {
        let store = MemoryStore::new();
        (EventTracker::new(Arc::new(store.clone())), store)
    }

    #[tokio::test]
    async fn test_mark_event_delegates_parsed_timestamp() {
        let (tracker, store) = tracker_with_store();

        tracker
            .mark_event("login", 42, Some("2024-01-01 10:15:00".into()))
            .await
            .unwrap();

        let calls = store.mark_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].event_name, "login");
        assert_eq!(calls[0].identifier, 42);
        assert_eq!(calls[0].timestamp, Utc.with_ymd_and_hms(2024, 1, 1, 10, 15, 0).unwrap());
    }

    #[tokio::test]
    async fn test_mark_event_defaults_to_now() {
        let (tracker, store) = tracker_with_store();

        let before = Utc::now();
        tracker.mark_event("login", 7, None).await.unwrap();
        let after = Utc::now();

        let calls = store.mark_calls();
        assert_eq!(calls.len(), 1);
        assert!(before <= calls[0].timestamp && calls[0].timestamp <= after);
    }

    #[tokio::test]
    async fn test_mark_event_invalid_date_skips_delegation() {
        let (tracker, store) = tracker_with_store();

        let result = tracker.mark_event("login", 42, Some("nonsense".into())).await;
        assert!(matches!(result, Err(TrackingError::InvalidDate(_))));
        assert!(store.mark_calls().is_empty());
    }

    #[tokio::test]
    async fn test_chaining() {
        let (tracker, store) = tracker_with_store();

        tracker
            .mark_event("login", 1, Some("2024-01-01 08:00:00".into()))
            .await
            .unwrap()
            .mark_event("login", 2, Some("2024-01-01 09:00:00".into()))
            .await
            .unwrap();

        assert_eq!(store.mark_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_combine_date_range_resolves_strings() {
        let (tracker, store) = tracker_with_store();

        tracker
            .mark_event("login", 1, Some("2024-01-01 08:00:00".into()))
            .await
            .unwrap();
        tracker
            .combine_date_range("login", "login:range", "2024-01-01".into(), "2024-01-02".into())
            .await
            .unwrap();

        assert_eq!(store.ids_for("login:range"), vec![1]);
    }

    #[tokio::test]
    async fn test_combine_date_range_bad_endpoint_skips_delegation() {
        let (tracker, store) = tracker_with_store();

        let result = tracker
            .combine_date_range("login", "dest", "2024-01-01".into(), "never".into())
            .await;
        assert!(matches!(result, Err(TrackingError::InvalidDate(_))));
        assert_eq!(store.count("dest"), 0);
    }

    #[test]
    fn test_period_for_coerces_raw_dates() {
        let (tracker, _) = tracker_with_store();

        let period = tracker
            .period_for(Granularity::Month, "2024-02-10".into(), "2024-02-10".into(), Endpoint::To)
            .unwrap();

        let expected: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(period.end + Duration::nanoseconds(1), expected);
    }

    #[test]
    fn test_bucket_key() {
        let (tracker, _) = tracker_with_store();

        let key = tracker
            .bucket(Granularity::Hour, "login", Some("2024-01-01 10:15:00".into()))
            .unwrap();
        assert_eq!(key.key(), "login:2024-01-01-10");
    }
}
