//! In-memory bitmap store implementation.
//!
//! This implementation keeps every bucket set in process memory, making it
//! suitable for unit tests and local development that need fast, isolated,
//! deterministic execution. It also records every delegated `mark` call so
//! tests can assert on exactly what was handed to the store.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::error::TrackingResult;
use crate::time::{EventKey, Granularity, TimeBucket};

use super::bitmap::BitmapStore;

/// One delegated `mark` call, as received by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkCall {
    pub event_name: String,
    pub identifier: u64,
    pub timestamp: DateTime<Utc>,
}

/// In-memory bitmap store.
#[derive(Clone)]
pub struct MemoryStore {
    data: Arc<RwLock<MemoryData>>,
}

struct MemoryData {
    keys: HashMap<String, BTreeSet<u64>>,
    mark_calls: Vec<MarkCall>,
    is_healthy: bool,
}

impl Default for MemoryData {
    fn default() -> Self {
        Self {
            keys: HashMap::new(),
            mark_calls: Vec::new(),
            is_healthy: true,
        }
    }
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(MemoryData::default())),
        }
    }

    /// Identifiers currently recorded under `key`, in ascending order.
    pub fn ids_for(&self, key: &str) -> Vec<u64> {
        let data = self.data.read().unwrap();
        data.keys.get(key).map(|ids| ids.iter().copied().collect()).unwrap_or_default()
    }

    /// Number of identifiers recorded under `key`.
    pub fn count(&self, key: &str) -> usize {
        let data = self.data.read().unwrap();
        data.keys.get(key).map(BTreeSet::len).unwrap_or(0)
    }

    /// Every `mark` call delegated to this store, in order.
    pub fn mark_calls(&self) -> Vec<MarkCall> {
        self.data.read().unwrap().mark_calls.clone()
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().unwrap().is_healthy = healthy;
    }

    /// Clear all data from the store.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        let is_healthy = data.is_healthy;
        *data = MemoryData { is_healthy, ..MemoryData::default() };
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BitmapStore for MemoryStore {
    async fn health_check(&self) -> TrackingResult<bool> {
        Ok(self.data.read().unwrap().is_healthy)
    }

    async fn mark(
        &self,
        event_name: &str,
        identifier: u64,
        timestamp: DateTime<Utc>,
    ) -> TrackingResult<()> {
        let mut data = self.data.write().unwrap();
        for granularity in Granularity::ALL {
            let key = EventKey::new(event_name, TimeBucket::new(granularity, timestamp)).key();
            data.keys.entry(key).or_default().insert(identifier);
        }
        data.mark_calls.push(MarkCall {
            event_name: event_name.to_string(),
            identifier,
            timestamp,
        });
        Ok(())
    }

    async fn combine_range(
        &self,
        source_key: &str,
        destination_key: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> TrackingResult<()> {
        let mut data = self.data.write().unwrap();
        let mut combined = BTreeSet::new();

        // Union the hour buckets overlapping [from, to].
        let mut cursor = Granularity::Hour.bucket_start(from);
        while cursor <= to {
            let key = EventKey::new(source_key, TimeBucket::new(Granularity::Hour, cursor)).key();
            if let Some(ids) = data.keys.get(&key) {
                combined.extend(ids.iter().copied());
            }
            cursor = cursor + Duration::hours(1);
        }

        data.keys.insert(destination_key.to_string(), combined);
        Ok(())
    }
}
