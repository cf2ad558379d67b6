use std::{sync::Arc, time::Duration};

use shared::domain::{ContentPath, Phase};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use view_integration::{ContentSource, DisplaySink};

use crate::{
    countdown::{CountdownController, TICK},
    daily_view::DailyViewController,
    error::EngineError,
    reveal::{RevealSequencer, RevealSettings},
    theme::ThemeTable,
    time_source::TimeSource,
    timer_registry::TimerRegistry,
    transition::{EngineEvent, Envelope, ViewTransitioner},
    window::EventWindow,
};

pub const DEFAULT_ENTRY_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub window: EventWindow,
    /// Pause before the daily view when the window has already started.
    pub entry_delay: Duration,
    pub reveal: RevealSettings,
    pub themes: ThemeTable,
    /// Countdown cadence; never zero.
    tick: Duration,
}

impl EngineConfig {
    pub fn new(window: EventWindow) -> Self {
        Self {
            window,
            entry_delay: DEFAULT_ENTRY_DELAY,
            reveal: RevealSettings::default(),
            themes: ThemeTable::default(),
            tick: TICK,
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Result<Self, EngineError> {
        if tick.is_zero() {
            return Err(EngineError::InvalidTick);
        }
        self.tick = tick;
        Ok(self)
    }
}

pub struct EngineDeps {
    pub clock: Arc<dyn TimeSource>,
    pub content: Arc<dyn ContentSource>,
    pub display: Arc<dyn DisplaySink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextView {
    Reveal,
    Daily,
}

/// Transition table of the page.
pub fn next_view(phase: &Phase, event: EngineEvent) -> Option<NextView> {
    match (phase, event) {
        (Phase::Starting, EngineEvent::EntryDelayElapsed)
        | (Phase::Reveal, EngineEvent::RevealElapsed)
        | (Phase::Daily { .. }, EngineEvent::MidnightRollover) => Some(NextView::Daily),
        (Phase::Countdown, EngineEvent::CountdownExpired) => Some(NextView::Reveal),
        _ => None,
    }
}

/// The page state machine. Timers only post events; this loop owns every
/// transition, so exactly one view's timers are live at a time.
pub struct App {
    config: EngineConfig,
    phase: Phase,
    registry: TimerRegistry,
    transitioner: ViewTransitioner,
    events: mpsc::UnboundedReceiver<Envelope>,
}

impl App {
    pub fn new(config: EngineConfig, deps: EngineDeps) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let registry = TimerRegistry::new();
        let transitioner =
            ViewTransitioner::new(tx, registry.clone(), deps.clock, deps.content, deps.display);
        Self {
            config,
            phase: Phase::Starting,
            registry,
            transitioner,
            events,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn registry(&self) -> &TimerRegistry {
        &self.registry
    }

    /// No timer is left and nothing can happen any more.
    pub fn is_settled(&self) -> bool {
        self.phase.is_terminal() && self.registry.is_empty()
    }

    /// Entry point: countdown before the window, otherwise the daily view
    /// after a short delay.
    pub async fn start(&mut self) {
        let now = self.transitioner.clock().now();
        if now < self.config.window.start {
            info!(%now, start = %self.config.window.start, "event not started yet");
            self.show_countdown().await;
        } else {
            let scope = self.transitioner.begin();
            let delay = self.config.entry_delay;
            let registry = scope.registry.clone();
            registry.spawn("entry-delay", move |id| async move {
                tokio::time::sleep(delay).await;
                scope.registry.release(id);
                scope.post(EngineEvent::EntryDelayElapsed);
            });
            self.phase = Phase::Starting;
        }
    }

    /// Runs the engine until it settles.
    pub async fn run(mut self) {
        self.start().await;
        while !self.is_settled() {
            let Some(envelope) = self.events.recv().await else {
                break;
            };
            self.dispatch(envelope).await;
        }
        info!(phase = self.phase.name(), "engine settled");
    }

    /// Applies one event. Events from an earlier view epoch are dropped.
    pub async fn dispatch(&mut self, envelope: Envelope) {
        if envelope.epoch != self.transitioner.epoch() {
            debug!(
                event = ?envelope.event,
                event_epoch = envelope.epoch,
                current_epoch = self.transitioner.epoch(),
                "dropping stale timer event"
            );
            return;
        }

        match next_view(&self.phase, envelope.event) {
            Some(NextView::Reveal) => self.show_reveal().await,
            Some(NextView::Daily) => self.show_daily().await,
            None => warn!(
                phase = self.phase.name(),
                event = ?envelope.event,
                "event has no transition in this phase"
            ),
        }
    }

    pub async fn show_countdown(&mut self) {
        let transition = self.transitioner.transition(&ContentPath::countdown()).await;
        if let Err(err) = transition.loaded {
            warn!(error = %err, "countdown view failed to load");
        }
        CountdownController::start(&transition.scope, self.config.window.start, self.config.tick);
        self.phase = Phase::Countdown;
    }

    pub async fn show_reveal(&mut self) {
        let transition = self.transitioner.transition(&ContentPath::reveal()).await;
        if let Err(err) = transition.loaded {
            warn!(error = %err, "reveal view failed to load");
        }
        RevealSequencer::start(&transition.scope, self.config.reveal);
        self.phase = Phase::Reveal;
    }

    pub async fn show_daily(&mut self) {
        self.phase =
            DailyViewController::show(&mut self.transitioner, &self.config.themes, self.config.tick)
                .await;
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.registry.clear_all();
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
