//! Canonical bucket keys for event storage.
//!
//! Store backends address one set of identifiers per event name, per
//! granularity bucket. The key fragments here fix that addressing scheme:
//!
//! ```text
//! year   2024
//! month  2024-02
//! week   2024-W06
//! day    2024-02-10
//! hour   2024-02-10-09
//! ```

use std::fmt;

use chrono::{DateTime, Datelike, Utc};

use super::period::{DatePeriod, Granularity};

/// One granularity bucket at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBucket {
    granularity: Granularity,
    timestamp: DateTime<Utc>,
}

impl TimeBucket {
    pub fn new(granularity: Granularity, timestamp: DateTime<Utc>) -> Self {
        TimeBucket { granularity, timestamp }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Canonical key fragment for this bucket.
    ///
    /// Week fragments use the ISO week-numbering year, which can differ from
    /// the calendar year around January 1st.
    pub fn key_fragment(&self) -> String {
        let ts = self.timestamp;
        match self.granularity {
            Granularity::Year => ts.format("%Y").to_string(),
            Granularity::Month => ts.format("%Y-%m").to_string(),
            Granularity::Week => {
                let iso = ts.iso_week();
                format!("{:04}-W{:02}", iso.year(), iso.week())
            }
            Granularity::Day => ts.format("%Y-%m-%d").to_string(),
            Granularity::Hour => ts.format("%Y-%m-%d-%H").to_string(),
        }
    }

    /// The full span of this bucket as a period.
    pub fn period(&self) -> DatePeriod {
        DatePeriod {
            start: self.granularity.bucket_start(self.timestamp),
            end: self.granularity.bucket_end(self.timestamp),
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key_fragment())
    }
}

/// A storage key scoping one event name to one time bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventKey {
    event_name: String,
    bucket: TimeBucket,
}

impl EventKey {
    pub fn new(event_name: impl Into<String>, bucket: TimeBucket) -> Self {
        EventKey { event_name: event_name.into(), bucket }
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn bucket(&self) -> &TimeBucket {
        &self.bucket
    }

    /// Storage key, `{event}:{bucket fragment}`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.event_name, self.bucket.key_fragment())
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
