use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{error::EngineError, ist_clock};

/// Zero-based month index of February.
pub const FEBRUARY: u32 = 1;

/// First and last scheduled day, both as zone-midnights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl EventWindow {
    /// `month0` is 0-based. The year is explicit; callers that want "this
    /// year" resolve it once with [`ist_clock::universal_year`].
    pub fn new(year: i32, month0: u32, start_day: u32, end_day: u32) -> Result<Self, EngineError> {
        if end_day < start_day {
            return Err(EngineError::InvalidWindow(format!(
                "end day {end_day} is before start day {start_day}"
            )));
        }
        Ok(Self {
            start: ist_clock::zone_midnight_as_universal(year, month0, start_day)?,
            end: ist_clock::zone_midnight_as_universal(year, month0, end_day)?,
        })
    }

    pub fn valentine_week(year: i32) -> Result<Self, EngineError> {
        Self::new(year, FEBRUARY, 3, 14)
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        now >= self.start
    }

    /// Zone-midnight after the last scheduled day.
    pub fn closes_at(&self) -> DateTime<Utc> {
        ist_clock::next_zone_midnight(self.end)
    }

    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        self.has_started(now) && now < self.closes_at()
    }
}
