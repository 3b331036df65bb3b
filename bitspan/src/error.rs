//! Error types for tracking operations.

/// Result type for tracking operations
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Error type for tracking operations
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    /// A period unit outside hour/day/week/month/year was supplied.
    #[error("Invalid granularity: {0}")]
    InvalidGranularity(String),

    /// A date string could not be parsed into a timestamp.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A named store connection is not registered.
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A store backend reported a failure.
    #[error("Store error: {0}")]
    Store(String),
}
