use chrono::{DateTime, Local, NaiveDateTime};
use std::fmt;
use std::time::SystemTime;

/// chrono pattern for `yyyyMMdd.HHmmss`
pub const CLOCK_FORMAT: &str = "%Y%m%d.%H%M%S";

/// Snapshot identifier `yyyyMMdd.HHmmss-<commit count>`.
///
/// The clock is wall-clock local time, truncated to whole seconds when formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampIdentifier {
    pub clock: NaiveDateTime,
    pub commit_count: u64,
}

impl TimestampIdentifier {
    pub fn new(clock: NaiveDateTime, commit_count: u64) -> Self {
        TimestampIdentifier {
            clock,
            commit_count,
        }
    }

    /// The `yyyyMMdd.HHmmss` part
    pub fn formatted_clock(&self) -> String {
        self.clock.format(CLOCK_FORMAT).to_string()
    }
}

impl fmt::Display for TimestampIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.formatted_clock(), self.commit_count)
    }
}

/// Convert a filesystem time to local wall-clock time
pub fn local_clock(time: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(time).naive_local()
}
