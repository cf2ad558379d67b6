use std::time::Duration;

use tracing::{debug, info};
use view_integration::CountdownDisplay;

use crate::{
    countdown::TICK,
    timer_registry::TimerId,
    transition::{EngineEvent, ViewScope},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSettings {
    /// Starting value of the on-screen countdown, also the length of the
    /// reveal in seconds.
    pub seconds: u32,
}

impl RevealSettings {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.seconds))
    }
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self { seconds: 20 }
    }
}

pub struct RevealTimers {
    pub visual: TimerId,
    pub trigger: TimerId,
}

/// Intermediate screen between the pre-event countdown and the first day.
///
/// The visual countdown is cosmetic; only the one-shot trigger moves the
/// engine forward.
pub struct RevealSequencer;

impl RevealSequencer {
    pub fn start(scope: &ViewScope, settings: RevealSettings) -> RevealTimers {
        let visual = {
            let scope = scope.clone();
            let start_from = settings.seconds;
            scope.registry.clone().spawn("reveal-visual", move |id| async move {
                let mut remaining = start_from;
                let mut interval = tokio::time::interval(TICK);
                loop {
                    interval.tick().await;
                    if !scope.is_current() {
                        scope.registry.release(id);
                        break;
                    }
                    scope.display.show_countdown(CountdownDisplay::Reveal {
                        seconds_left: remaining,
                    });
                    if remaining == 0 {
                        debug!(epoch = scope.epoch(), "reveal visual countdown finished");
                        scope.registry.release(id);
                        break;
                    }
                    remaining -= 1;
                }
            })
        };

        let trigger = {
            let scope = scope.clone();
            let delay = settings.duration();
            scope.registry.clone().spawn("reveal-trigger", move |id| async move {
                tokio::time::sleep(delay).await;
                info!(epoch = scope.epoch(), "reveal finished");
                scope.registry.release(id);
                scope.post(EngineEvent::RevealElapsed);
            })
        };

        RevealTimers { visual, trigger }
    }
}

#[cfg(test)]
#[path = "tests/reveal_tests.rs"]
mod tests;
