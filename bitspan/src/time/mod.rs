//! Date normalization and period alignment.
//!
//! This module owns every date computation in the crate:
//!
//! - [`input`]: the [`DateInput`] sum type accepted at the API edge, and the
//!   string-to-timestamp coercion behind it
//! - [`period`]: the [`Granularity`] enumeration and [`DatePeriod`] boundary
//!   alignment for range endpoints
//! - [`bucket`]: canonical bucket key fragments handed to store backends
//!
//! All timestamps are UTC. Raw strings without an explicit offset are read
//! as UTC; weeks follow ISO 8601 and start on Monday.

pub mod bucket;
pub mod input;
pub mod period;

pub use bucket::{EventKey, TimeBucket};
pub use input::DateInput;
pub use period::{DatePeriod, Endpoint, Granularity};
