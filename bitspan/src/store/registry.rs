//! Named store connections.
//!
//! A [`StoreRegistry`] owns the mapping from connection names to store
//! clients. Callers acquire a bound [`EventTracker`] through it instead of
//! resolving stores through ambient global state; the registry instance is
//! passed to whoever needs it.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use crate::error::{TrackingError, TrackingResult};
use crate::tracker::EventTracker;

use super::bitmap::BitmapStore;
use super::config::TrackingConfig;
use super::factory::StoreFactory;

/// A store connection argument: either an already-usable client or the name
/// of a registered connection.
#[derive(Clone)]
pub enum StoreHandle {
    /// A client handle used directly, bypassing the registry lookup.
    Client(Arc<dyn BitmapStore>),
    /// A connection name resolved through the registry.
    Named(String),
}

impl From<&str> for StoreHandle {
    fn from(name: &str) -> Self {
        StoreHandle::Named(name.to_string())
    }
}

impl From<String> for StoreHandle {
    fn from(name: String) -> Self {
        StoreHandle::Named(name)
    }
}

impl From<Arc<dyn BitmapStore>> for StoreHandle {
    fn from(client: Arc<dyn BitmapStore>) -> Self {
        StoreHandle::Client(client)
    }
}

/// Registry of named store connections.
pub struct StoreRegistry {
    stores: HashMap<String, Arc<dyn BitmapStore>>,
    default_connection: String,
}

impl StoreRegistry {
    /// Create an empty registry whose default connection is `"default"`.
    pub fn new() -> Self {
        Self::with_default("default")
    }

    /// Create an empty registry with an explicit default connection name.
    pub fn with_default(name: impl Into<String>) -> Self {
        Self { stores: HashMap::new(), default_connection: name.into() }
    }

    /// Build a registry from a tracking configuration.
    ///
    /// Every configured connection gets a store created by the
    /// [`StoreFactory`]; an unknown backend string fails the whole load.
    pub fn from_config(config: &TrackingConfig) -> TrackingResult<Self> {
        let mut registry = Self::with_default(config.tracking.default_connection.clone());
        for name in config.connections.keys() {
            let kind = config.backend_kind(name)?;
            registry.register(name.clone(), StoreFactory::create(kind));
        }
        if !config.connections.is_empty()
            && !config.connections.contains_key(&registry.default_connection)
        {
            warn!(
                "Default connection '{}' is not among the configured connections",
                registry.default_connection
            );
        }
        Ok(registry)
    }

    /// Register a store under a connection name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, store: Arc<dyn BitmapStore>) -> &mut Self {
        let name = name.into();
        debug!("Registering store connection '{}'", name);
        self.stores.insert(name, store);
        self
    }

    /// Name of the default connection.
    pub fn default_connection(&self) -> &str {
        &self.default_connection
    }

    /// Whether a connection name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.stores.contains_key(name)
    }

    /// Number of registered connections.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Resolve a handle to a store client.
    ///
    /// A `Client` handle is returned as-is; a `Named` handle is looked up in
    /// the registry; `None` resolves the default connection.
    ///
    /// # Returns
    /// * `Ok(Arc<dyn BitmapStore>)` - the bound client
    /// * `Err(TrackingError::ConnectionNotFound)` - unregistered name, surfaced unchanged
    pub fn resolve(&self, handle: Option<StoreHandle>) -> TrackingResult<Arc<dyn BitmapStore>> {
        match handle {
            Some(StoreHandle::Client(client)) => Ok(client),
            Some(StoreHandle::Named(name)) => self.named(&name),
            None => self.named(&self.default_connection),
        }
    }

    fn named(&self, name: &str) -> TrackingResult<Arc<dyn BitmapStore>> {
        self.stores
            .get(name)
            .cloned()
            .ok_or_else(|| TrackingError::ConnectionNotFound(name.to_string()))
    }

    /// Construct an [`EventTracker`] bound to the resolved connection.
    pub fn tracker(&self, handle: Option<StoreHandle>) -> TrackingResult<EventTracker> {
        Ok(EventTracker::new(self.resolve(handle)?))
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[test]
    fn test_resolve_named_connection() {
        let mut registry = StoreRegistry::new();
        registry.register("analytics", Arc::new(MemoryStore::new()));

        assert!(registry.contains("analytics"));
        assert!(registry.resolve(Some("analytics".into())).is_ok());
    }

    #[test]
    fn test_resolve_default_connection() {
        let mut registry = StoreRegistry::new();
        registry.register("default", Arc::new(MemoryStore::new()));

        assert!(registry.resolve(None).is_ok());
    }

    #[test]
    fn test_connection_not_found() {
        let registry = StoreRegistry::new();

        let result = registry.resolve(Some("missing".into()));
        match result {
            Err(TrackingError::ConnectionNotFound(name)) => assert_eq!(name, "missing"),
            other => panic!("expected ConnectionNotFound, got {:?}", other.map(|_| ())),
        }

        // An empty registry cannot resolve its default either.
        assert!(matches!(
            registry.resolve(None),
            Err(TrackingError::ConnectionNotFound(_))
        ));
    }

    #[test]
    fn test_client_handle_bypasses_registry() {
        let registry = StoreRegistry::new();
        let client: Arc<dyn BitmapStore> = Arc::new(MemoryStore::new());

        // No registration needed when the caller already has a client.
        let resolved = registry.resolve(Some(StoreHandle::Client(client)));
        assert!(resolved.is_ok());
    }

    #[test]
    fn test_from_config() {
        let toml = r#"
[tracking]
default_connection = "main"

[connections.main]
backend = "memory"

[connections.analytics]
backend = "memory"
"#;
        let config: TrackingConfig = toml::from_str(toml).unwrap();
        let registry = StoreRegistry::from_config(&config).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.default_connection(), "main");
        assert!(registry.tracker(None).is_ok());
        assert!(registry.tracker(Some("analytics".into())).is_ok());
    }
}
