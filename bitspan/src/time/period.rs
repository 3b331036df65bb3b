//! Granularity buckets and range-endpoint alignment.
//!
//! A [`DatePeriod`] is the pair of granularity-aligned boundaries for a date
//! range. Alignment direction depends on which end of the range a timestamp
//! anchors: a `from` endpoint truncates down to the first instant of its
//! bucket, a `to` endpoint advances to the last instant of its bucket. Year
//! periods are always symmetric and span whole years.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TrackingError;

/// The bucket size used to align a date range.
///
/// A closed enumeration; parsing any other unit name fails with
/// [`TrackingError::InvalidGranularity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hour,
    Day,
    /// ISO 8601 weeks, starting Monday.
    Week,
    Month,
    Year,
}

impl Granularity {
    /// All five granularities, coarsest last.
    pub const ALL: [Granularity; 5] = [
        Granularity::Hour,
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ];

    /// Canonical lowercase name of this granularity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    /// First instant of the bucket containing `ts`.
    pub fn bucket_start(&self, ts: DateTime<Utc>) -> DateTime<Utc> {
        let date = ts.date_naive();
        let naive = match self {
            Granularity::Hour => date.and_hms_opt(ts.hour(), 0, 0).expect("valid time"),
            Granularity::Day => date.and_hms_opt(0, 0, 0).expect("valid time"),
            Granularity::Week => {
                let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
                monday.and_hms_opt(0, 0, 0).expect("valid time")
            }
            Granularity::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                .expect("valid date")
                .and_hms_opt(0, 0, 0)
                .expect("valid time"),
            Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)
                .expect("valid date")
                .and_hms_opt(0, 0, 0)
                .expect("valid time"),
        };
        Utc.from_utc_datetime(&naive)
    }

    /// First instant of the bucket after the one containing `ts`.
    pub fn next_bucket_start(&self, ts: DateTime<Utc>) -> DateTime<Utc> {
        let start = self.bucket_start(ts);
        match self {
            Granularity::Hour => start + Duration::hours(1),
            Granularity::Day => start + Duration::days(1),
            Granularity::Week => start + Duration::days(7),
            Granularity::Month => {
                let (year, month) = if start.month() == 12 {
                    (start.year() + 1, 1)
                } else {
                    (start.year(), start.month() + 1)
                };
                let naive = NaiveDate::from_ymd_opt(year, month, 1)
                    .expect("valid date")
                    .and_hms_opt(0, 0, 0)
                    .expect("valid time");
                Utc.from_utc_datetime(&naive)
            }
            Granularity::Year => {
                let naive = NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
                    .expect("valid date")
                    .and_hms_opt(0, 0, 0)
                    .expect("valid time");
                Utc.from_utc_datetime(&naive)
            }
        }
    }

    /// Last instant of the bucket containing `ts`, one nanosecond before the
    /// next bucket starts.
    pub fn bucket_end(&self, ts: DateTime<Utc>) -> DateTime<Utc> {
        self.next_bucket_start(ts) - Duration::nanoseconds(1)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = TrackingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hour" => Ok(Granularity::Hour),
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            _ => Err(TrackingError::InvalidGranularity(s.to_string())),
        }
    }
}

/// Which end of a range a timestamp anchors.
///
/// The endpoint role picks the alignment direction: `From` rounds down to
/// bucket starts, `To` rounds up to bucket ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    From,
    To,
}

/// A resolved pair of granularity-aligned boundaries for a date range.
///
/// Invariant: `start <= end` whenever `from <= to` at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DatePeriod {
    /// Align `from` and `to` to `granularity` boundaries for the given
    /// endpoint role.
    ///
    /// For hour, day, week, and month the role's direction applies to both
    /// boundaries. Year periods ignore the role and always span from the
    /// first instant of `from`'s year to the last instant of `to`'s year.
    ///
    /// # Arguments
    /// * `granularity` - Bucket size to align to
    /// * `from` - Range start timestamp
    /// * `to` - Range end timestamp
    /// * `endpoint` - Which end of a larger range this period anchors
    pub fn for_range(
        granularity: Granularity,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        endpoint: Endpoint,
    ) -> Self {
        if granularity == Granularity::Year {
            return DatePeriod {
                start: granularity.bucket_start(from),
                end: granularity.bucket_end(to),
            };
        }
        match endpoint {
            Endpoint::From => DatePeriod {
                start: granularity.bucket_start(from),
                end: granularity.bucket_start(to),
            },
            Endpoint::To => DatePeriod {
                start: granularity.bucket_end(from),
                end: granularity.bucket_end(to),
            },
        }
    }

    /// Whether `ts` falls inside this period, boundaries included.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}
