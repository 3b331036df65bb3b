//! Integration tests for the tracking facade over the in-memory store.

use std::sync::Arc;

use bitspan::{
    BitmapStore, DatePeriod, Endpoint, EventTracker, Granularity, MemoryStore, StoreRegistry,
    TrackingConfig, TrackingError,
};
use chrono::{Duration, TimeZone, Utc};

#[tokio::test]
async fn test_store_health_check() {
    let store: Arc<dyn BitmapStore> = Arc::new(MemoryStore::new());
    let result = store.health_check().await;
    assert!(result.is_ok());
    assert!(result.unwrap());
}

#[tokio::test]
async fn test_mark_and_query_date_range() {
    let store = MemoryStore::new();
    let tracker = EventTracker::new(Arc::new(store.clone()));

    // Three logins across two days, one outside the queried range.
    tracker
        .mark_event("login", 1, Some("2024-01-01 08:30:00".into()))
        .await
        .unwrap()
        .mark_event("login", 2, Some("2024-01-01 17:45:00".into()))
        .await
        .unwrap()
        .mark_event("login", 3, Some("2024-01-05 09:00:00".into()))
        .await
        .unwrap();

    tracker
        .combine_date_range(
            "login",
            "login:new-year",
            "2024-01-01".into(),
            "2024-01-02 23:59:59".into(),
        )
        .await
        .unwrap();

    assert_eq!(store.ids_for("login:new-year"), vec![1, 2]);
}

#[tokio::test]
async fn test_same_identifier_marked_once_per_bucket() {
    let store = MemoryStore::new();
    let tracker = EventTracker::new(Arc::new(store.clone()));

    for hour in ["08", "09", "10"] {
        tracker
            .mark_event("visit", 42, Some(format!("2024-06-15 {}:00:00", hour).into()))
            .await
            .unwrap();
    }

    // Three marks, three hour buckets, but one identifier per day bucket.
    assert_eq!(store.mark_calls().len(), 3);
    assert_eq!(store.ids_for("visit:2024-06-15"), vec![42]);
    assert_eq!(store.ids_for("visit:2024-06-15-09"), vec![42]);
}

#[tokio::test]
async fn test_registry_end_to_end() {
    let toml = r#"
[tracking]
default_connection = "main"

[connections.main]
backend = "memory"
"#;
    let config: TrackingConfig = toml::from_str(toml).unwrap();
    let registry = StoreRegistry::from_config(&config).unwrap();

    let tracker = registry.tracker(None).unwrap();
    tracker
        .mark_event("signup", 9, Some("2024-03-01T12:00:00Z".into()))
        .await
        .unwrap();

    // The named connection resolves to the same store instance.
    let same = registry.tracker(Some("main".into())).unwrap();
    same.combine_date_range("signup", "signup:march", "2024-03-01".into(), "2024-03-31".into())
        .await
        .unwrap();

    let missing = registry.tracker(Some("replica".into()));
    assert!(matches!(missing, Err(TrackingError::ConnectionNotFound(_))));
}

#[tokio::test]
async fn test_period_endpoints_bracket_range() {
    let tracker = EventTracker::new(Arc::new(MemoryStore::new()));

    let from = tracker
        .period_for(Granularity::Day, "2024-02-10".into(), "2024-02-10".into(), Endpoint::From)
        .unwrap();
    let to = tracker
        .period_for(Granularity::Day, "2024-02-10".into(), "2024-02-10".into(), Endpoint::To)
        .unwrap();

    assert_eq!(from.start, Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap());
    assert_eq!(
        to.end + Duration::nanoseconds(1),
        Utc.with_ymd_and_hms(2024, 2, 11, 0, 0, 0).unwrap()
    );
    assert!(from.start <= to.end);
}

#[tokio::test]
async fn test_year_period_spans_whole_years() {
    let tracker = EventTracker::new(Arc::new(MemoryStore::new()));

    let period = tracker
        .period_for(Granularity::Year, "2020-06-01".into(), "2022-03-01".into(), Endpoint::From)
        .unwrap();

    assert_eq!(
        period,
        DatePeriod {
            start: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap() - Duration::nanoseconds(1),
        }
    );
}

#[tokio::test]
async fn test_unparsable_dates_never_reach_store() {
    let store = MemoryStore::new();
    let tracker = EventTracker::new(Arc::new(store.clone()));

    let result = tracker
        .combine_date_range("login", "dest", "soon".into(), "2024-01-01".into())
        .await;

    assert!(matches!(result, Err(TrackingError::InvalidDate(_))));
    assert!(store.mark_calls().is_empty());
    assert_eq!(store.count("dest"), 0);
}
