//! Tracking configuration file support.
//!
//! This module provides utilities for reading named-connection configuration
//! from TOML files:
//!
//! ```toml
//! [tracking]
//! default_connection = "default"
//!
//! [connections.default]
//! backend = "memory"
//!
//! [connections.analytics]
//! backend = "memory"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TrackingError, TrackingResult};

use super::factory::BackendKind;

/// Tracking configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackingConfig {
    #[serde(default)]
    pub tracking: TrackingSettings,
    #[serde(default)]
    pub connections: HashMap<String, ConnectionSettings>,
}

/// Top-level tracking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingSettings {
    #[serde(default = "default_connection_name")]
    pub default_connection: String,
}

/// Settings for one named connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    #[serde(default = "default_backend")]
    pub backend: String,
}

fn default_connection_name() -> String {
    "default".to_string()
}

fn default_backend() -> String {
    "memory".to_string()
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self { default_connection: default_connection_name() }
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self { backend: default_backend() }
    }
}

impl TrackingConfig {
    /// Load tracking configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(TrackingConfig)` if successful
    /// * `Err(TrackingError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> TrackingResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            TrackingError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: TrackingConfig = toml::from_str(&content).map_err(|e| {
            TrackingError::Configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Backend kind configured for `name`.
    ///
    /// # Returns
    /// * `Ok(BackendKind)` for a known connection with a valid backend
    /// * `Err(TrackingError::ConnectionNotFound)` for an unknown connection name
    /// * `Err(TrackingError::Configuration)` for an unknown backend string
    pub fn backend_kind(&self, name: &str) -> TrackingResult<BackendKind> {
        let settings = self
            .connections
            .get(name)
            .ok_or_else(|| TrackingError::ConnectionNotFound(name.to_string()))?;
        BackendKind::from_str(&settings.backend)
    }
}
