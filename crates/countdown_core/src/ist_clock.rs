//! Fixed-offset (UTC+5:30) calendar arithmetic.
//!
//! Every "which day is it" question in the engine goes through this module.
//! Instants are shifted by the constant offset with plain millisecond
//! arithmetic and the shifted value is read with UTC accessors only, so the
//! host machine's local zone never leaks into day boundaries.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc};
use shared::domain::DayKey;

use crate::error::EngineError;

pub const IST_OFFSET_MS: i64 = (5 * 60 + 30) * 60 * 1_000;
pub const DAY_MS: i64 = 86_400_000;

fn offset() -> TimeDelta {
    TimeDelta::milliseconds(IST_OFFSET_MS)
}

fn shifted(now: DateTime<Utc>) -> DateTime<Utc> {
    now + offset()
}

fn midnight_of(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc() - offset()
}

/// Universal instant of 00:00 in the fixed zone on the given date.
/// `month0` is 0-based (1 is February).
pub fn zone_midnight_as_universal(
    year: i32,
    month0: u32,
    day: u32,
) -> Result<DateTime<Utc>, EngineError> {
    let date = NaiveDate::from_ymd_opt(year, month0 + 1, day).ok_or(EngineError::InvalidDate {
        year,
        month0,
        day,
    })?;
    Ok(midnight_of(date))
}

pub fn today_key(now: DateTime<Utc>) -> DayKey {
    let local = shifted(now);
    DayKey::from_month_day(local.month(), local.day())
}

pub fn next_zone_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = shifted(now) + TimeDelta::milliseconds(DAY_MS);
    midnight_of(tomorrow.date_naive())
}

/// Calendar year of `now` in UTC. Used once at startup to pick the window year.
pub fn universal_year(now: DateTime<Utc>) -> i32 {
    now.year()
}

#[cfg(test)]
#[path = "tests/ist_clock_tests.rs"]
mod tests;
