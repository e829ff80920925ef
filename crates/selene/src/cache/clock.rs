use crate::error::{Result, SeleneError};
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use selene_config::{CacheSettings, MAX_UTC_OFFSET_MINUTES};

/// Resolves the local calendar day that cache buckets are keyed by.
///
/// Callers resolve `today` once per logical operation and pass the same
/// date to every cache call in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalClock {
    offset: FixedOffset,
}

impl LocalClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Offsets beyond ±18h are rejected, matching settings validation.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self> {
        if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&minutes) {
            return Err(SeleneError::InvalidUtcOffset { minutes });
        }
        FixedOffset::east_opt(minutes * 60)
            .map(Self::new)
            .ok_or(SeleneError::InvalidUtcOffset { minutes })
    }

    pub fn from_settings(settings: &CacheSettings) -> Result<Self> {
        Self::from_offset_minutes(settings.utc_offset_minutes)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Local date at the given instant.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }

    /// Local date right now, read from the system clock.
    pub fn today_now(&self) -> NaiveDate {
        self.today(Utc::now())
    }
}

impl Default for LocalClock {
    fn default() -> Self {
        Self::utc()
    }
}
