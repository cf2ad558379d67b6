use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DAY_MS: u64 = 86_400_000;
const HOUR_MS: u64 = 3_600_000;
const MINUTE_MS: u64 = 60_000;
const SECOND_MS: u64 = 1_000;
const LEAP_YEAR: i32 = 2024;

macro_rules! string_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_newtype!(ThemeId);
string_newtype!(ContentPath);

/// Calendar day in the fixed display zone, always `MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(String);

impl DayKey {
    /// `month` is 1-based.
    pub fn from_month_day(month: u32, day: u32) -> Self {
        Self(format!("{month:02}-{day:02}"))
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let (month, day) = raw.split_once('-')?;
        if month.len() != 2 || day.len() != 2 {
            return None;
        }
        let month: u32 = month.parse().ok()?;
        let day: u32 = day.parse().ok()?;
        // Checked against a leap year so that 02-29 stays valid.
        NaiveDate::from_ymd_opt(LEAP_YEAR, month, day)?;
        Some(Self::from_month_day(month, day))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DayKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid day key '{value}', expected MM-DD"))
    }
}

impl From<DayKey> for String {
    fn from(value: DayKey) -> Self {
        value.0
    }
}

impl ContentPath {
    pub fn countdown() -> Self {
        Self::new("views/countdown.html")
    }

    pub fn reveal() -> Self {
        Self::new("views/reveal.html")
    }

    pub fn for_day(key: &DayKey) -> Self {
        Self(format!("days/{key}.html"))
    }
}

/// Remaining time until the event start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownParts {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownParts {
    pub fn from_millis(diff_ms: u64) -> Self {
        Self {
            days: diff_ms / DAY_MS,
            hours: (diff_ms / HOUR_MS) % 24,
            minutes: (diff_ms / MINUTE_MS) % 60,
            seconds: (diff_ms / SECOND_MS) % 60,
        }
    }
}

impl fmt::Display for CountdownParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Remaining time inside a single day; there is never a day component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockParts {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl ClockParts {
    pub fn from_millis(diff_ms: u64) -> Self {
        let parts = CountdownParts::from_millis(diff_ms);
        Self {
            hours: parts.hours,
            minutes: parts.minutes,
            seconds: parts.seconds,
        }
    }
}

impl fmt::Display for ClockParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Starting,
    Countdown,
    Reveal,
    Daily {
        key: DayKey,
        theme: Option<ThemeId>,
    },
    OutOfRange {
        key: DayKey,
    },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Starting => "starting",
            Phase::Countdown => "countdown",
            Phase::Reveal => "reveal",
            Phase::Daily { .. } => "daily",
            Phase::OutOfRange { .. } => "out_of_range",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::OutOfRange { .. })
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
