use super::*;

fn utc(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("rfc3339")
        .with_timezone(&Utc)
}

#[test]
fn today_key_reads_shifted_calendar_day() {
    assert_eq!(today_key(utc("2026-02-03T04:42:00Z")).as_str(), "02-03");
    assert_eq!(today_key(utc("2026-02-28T17:30:00Z")).as_str(), "02-28");
}

#[test]
fn today_key_switches_exactly_at_zone_midnight() {
    assert_eq!(today_key(utc("2026-02-03T18:29:59Z")).as_str(), "02-03");
    assert_eq!(today_key(utc("2026-02-03T18:30:00Z")).as_str(), "02-04");
}

#[test]
fn today_key_crosses_into_march_and_new_year() {
    assert_eq!(today_key(utc("2026-02-28T18:30:00Z")).as_str(), "03-01");
    assert_eq!(today_key(utc("2026-12-31T18:30:00Z")).as_str(), "01-01");
}

#[test]
fn zone_midnight_is_previous_universal_evening() {
    assert_eq!(
        zone_midnight_as_universal(2026, 1, 3).expect("date"),
        utc("2026-02-02T18:30:00Z")
    );
}

#[test]
fn zone_midnight_rejects_impossible_dates() {
    assert_eq!(
        zone_midnight_as_universal(2026, 1, 30),
        Err(EngineError::InvalidDate {
            year: 2026,
            month0: 1,
            day: 30
        })
    );
    assert!(zone_midnight_as_universal(2026, 12, 1).is_err());
}

#[test]
fn next_zone_midnight_mid_morning() {
    let now = utc("2026-02-03T04:42:00Z");
    let next = next_zone_midnight(now);
    assert_eq!(next, utc("2026-02-03T18:30:00Z"));
    assert_eq!((next - now).num_minutes(), 828);
}

#[test]
fn next_zone_midnight_crosses_year_boundary() {
    assert_eq!(
        next_zone_midnight(utc("2026-12-31T17:30:00Z")),
        utc("2026-12-31T18:30:00Z")
    );
}

#[test]
fn next_zone_midnight_at_midnight_is_a_full_day_later() {
    let midnight = utc("2026-02-03T18:30:00Z");
    assert_eq!(next_zone_midnight(midnight), utc("2026-02-04T18:30:00Z"));
}

#[test]
fn next_zone_midnight_handles_leap_day() {
    assert_eq!(
        next_zone_midnight(utc("2028-02-28T20:00:00Z")),
        utc("2028-02-29T18:30:00Z")
    );
}

#[test]
fn universal_year_ignores_zone_offset() {
    // Already 2027 in the fixed zone, still 2026 universally.
    assert_eq!(universal_year(utc("2026-12-31T20:00:00Z")), 2026);
}
