use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::domain::{ClockParts, CountdownParts, DayKey, ThemeId};

use crate::{
    countdown::{evaluate_until_midnight, evaluate_until_start, Tick},
    ist_clock,
    theme::ThemeTable,
    window::EventWindow,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    Upcoming,
    Open,
    Closed,
}

/// One-shot snapshot of what the page would show at `now`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub now: DateTime<Utc>,
    pub today: DayKey,
    pub theme: Option<ThemeId>,
    pub window: EventWindow,
    pub state: WindowState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until_start: Option<CountdownParts>,
    pub next_midnight: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until_midnight: Option<ClockParts>,
}

impl StatusReport {
    pub fn at(now: DateTime<Utc>, window: EventWindow, themes: &ThemeTable) -> Self {
        let today = ist_clock::today_key(now);
        let theme = themes.lookup(&today).cloned();
        let state = if !window.has_started(now) {
            WindowState::Upcoming
        } else if window.contains(now) {
            WindowState::Open
        } else {
            WindowState::Closed
        };
        let until_start = match evaluate_until_start(window.start, now) {
            Tick::Remaining(parts) => Some(parts),
            Tick::Expired => None,
        };
        let next_midnight = ist_clock::next_zone_midnight(now);
        let until_midnight = match evaluate_until_midnight(next_midnight, now) {
            Tick::Remaining(parts) => Some(parts),
            Tick::Expired => None,
        };

        Self {
            now,
            today,
            theme,
            window,
            state,
            until_start,
            next_midnight,
            until_midnight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw)
            .expect("rfc3339")
            .with_timezone(&Utc)
    }

    #[test]
    fn upcoming_report_counts_down_to_start() {
        let window = EventWindow::valentine_week(2026).expect("window");
        let report = StatusReport::at(utc("2026-02-01T18:30:00Z"), window, &ThemeTable::default());

        assert_eq!(report.state, WindowState::Upcoming);
        assert_eq!(report.today.as_str(), "02-02");
        assert_eq!(report.theme, None);
        assert_eq!(
            report.until_start,
            Some(CountdownParts {
                days: 1,
                hours: 0,
                minutes: 0,
                seconds: 0,
            })
        );
    }

    #[test]
    fn open_report_has_theme_and_midnight_countdown() {
        let window = EventWindow::valentine_week(2026).expect("window");
        let report = StatusReport::at(utc("2026-02-03T04:42:00Z"), window, &ThemeTable::default());

        assert_eq!(report.state, WindowState::Open);
        assert_eq!(report.theme, Some(ThemeId::new("rose-day")));
        assert_eq!(report.until_start, None);
        assert_eq!(report.next_midnight, utc("2026-02-03T18:30:00Z"));
        assert_eq!(
            report.until_midnight,
            Some(ClockParts {
                hours: 13,
                minutes: 48,
                seconds: 0,
            })
        );

        let json = serde_json::to_value(&report).expect("json");
        assert_eq!(json["state"], "open");
        assert_eq!(json["today"], "02-03");
        assert!(json.get("until_start").is_none());
    }

    #[test]
    fn closed_after_last_day() {
        let window = EventWindow::valentine_week(2026).expect("window");
        let report = StatusReport::at(utc("2026-02-20T00:00:00Z"), window, &ThemeTable::default());
        assert_eq!(report.state, WindowState::Closed);
    }
}
