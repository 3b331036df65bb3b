//! Store factory for dependency injection.
//!
//! This module provides utilities for creating store instances based on
//! runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use crate::error::TrackingError;

use super::bitmap::BitmapStore;
use super::memory::MemoryStore;

/// Store backend configuration.
///
/// The in-memory backend is the only one shipped in-tree; real engines are
/// expected to implement [`BitmapStore`] and be registered directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-memory store for tests and local development
    Memory,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
        }
    }
}

impl FromStr for BackendKind {
    type Err = TrackingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            _ => Err(TrackingError::Configuration(format!("Unknown store backend: {}", s))),
        }
    }
}

/// Factory for creating store instances.
pub struct StoreFactory;

impl StoreFactory {
    /// Create a store instance for the given backend kind.
    pub fn create(kind: BackendKind) -> Arc<dyn BitmapStore> {
        match kind {
            BackendKind::Memory => Arc::new(MemoryStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("memory".parse::<BackendKind>().unwrap(), BackendKind::Memory);
        assert_eq!("Memory".parse::<BackendKind>().unwrap(), BackendKind::Memory);

        let result = "redis".parse::<BackendKind>();
        assert!(matches!(result, Err(TrackingError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_create_memory_store() {
        let store = StoreFactory::create(BackendKind::Memory);
        assert!(store.health_check().await.unwrap());
    }
}
