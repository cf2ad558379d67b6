//! Repeating one-second countdown timers.

use std::time::Duration;

use chrono::{DateTime, Utc};
use shared::domain::{ClockParts, CountdownParts};
use tokio::time::MissedTickBehavior;
use tracing::info;
use view_integration::CountdownDisplay;

use crate::{
    timer_registry::TimerId,
    transition::{EngineEvent, ViewScope},
};

pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick<P> {
    Remaining(P),
    Expired,
}

fn remaining_ms(target: DateTime<Utc>, now: DateTime<Utc>) -> Option<u64> {
    let diff = (target - now).num_milliseconds();
    if diff <= 0 {
        None
    } else {
        Some(diff as u64)
    }
}

pub fn evaluate_until_start(target: DateTime<Utc>, now: DateTime<Utc>) -> Tick<CountdownParts> {
    match remaining_ms(target, now) {
        Some(diff) => Tick::Remaining(CountdownParts::from_millis(diff)),
        None => Tick::Expired,
    }
}

pub fn evaluate_until_midnight(target: DateTime<Utc>, now: DateTime<Utc>) -> Tick<ClockParts> {
    match remaining_ms(target, now) {
        Some(diff) => Tick::Remaining(ClockParts::from_millis(diff)),
        None => Tick::Expired,
    }
}

/// Generic tick loop: the first tick fires immediately, then every `tick`.
/// On expiry the timer releases its own registry entry and posts `expired`.
fn start_ticker<P, E, R>(
    scope: &ViewScope,
    label: &'static str,
    target: DateTime<Utc>,
    tick: Duration,
    evaluate: E,
    render: R,
    expired: EngineEvent,
) -> TimerId
where
    P: Send + 'static,
    E: Fn(DateTime<Utc>, DateTime<Utc>) -> Tick<P> + Send + 'static,
    R: Fn(P) -> CountdownDisplay + Send + 'static,
{
    let scope = scope.clone();
    let registry = scope.registry.clone();
    registry.spawn(label, move |id| async move {
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if !scope.is_current() {
                scope.registry.release(id);
                break;
            }
            match evaluate(target, scope.clock.now()) {
                Tick::Remaining(parts) => scope.display.show_countdown(render(parts)),
                Tick::Expired => {
                    info!(label, %target, epoch = scope.epoch(), "countdown reached zero");
                    scope.registry.release(id);
                    scope.post(expired);
                    break;
                }
            }
        }
    })
}

/// Pre-event countdown towards the window start.
pub struct CountdownController;

impl CountdownController {
    pub fn start(scope: &ViewScope, start: DateTime<Utc>, tick: Duration) -> TimerId {
        start_ticker(
            scope,
            "countdown",
            start,
            tick,
            evaluate_until_start,
            CountdownDisplay::UntilStart,
            EngineEvent::CountdownExpired,
        )
    }
}

/// Countdown to the zone-midnight ending the displayed day; expiry is the
/// day rollover.
pub struct DailyCountdownController;

impl DailyCountdownController {
    /// `next_midnight` must come from the same clock reading as the day key
    /// of the view.
    pub fn start(scope: &ViewScope, next_midnight: DateTime<Utc>, tick: Duration) -> TimerId {
        start_ticker(
            scope,
            "daily-countdown",
            next_midnight,
            tick,
            evaluate_until_midnight,
            CountdownDisplay::UntilMidnight,
            EngineEvent::MidnightRollover,
        )
    }
}

#[cfg(test)]
#[path = "tests/countdown_tests.rs"]
mod tests;
