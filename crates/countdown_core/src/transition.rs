use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::{domain::ContentPath, error::ContentError};
use tokio::sync::mpsc;
use tracing::{debug, info};
use view_integration::{ContentSource, DisplaySink};

use crate::{time_source::TimeSource, timer_registry::TimerRegistry};

/// Things timers report back to the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    EntryDelayElapsed,
    CountdownExpired,
    RevealElapsed,
    MidnightRollover,
}

/// An event stamped with the view epoch of the timer that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    pub epoch: u64,
    pub event: EngineEvent,
}

/// Everything the controllers of one displayed view need.
#[derive(Clone)]
pub struct ViewScope {
    epoch: u64,
    current: Arc<AtomicU64>,
    events: mpsc::UnboundedSender<Envelope>,
    pub registry: TimerRegistry,
    pub clock: Arc<dyn TimeSource>,
    pub display: Arc<dyn DisplaySink>,
}

impl ViewScope {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// False once a later transition has opened a new view. Timers check it
    /// before rendering, since an abort only lands at their next await.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.epoch
    }

    /// Posts `event` for this view. A closed channel means the engine is gone,
    /// so there is nobody left to tell.
    pub fn post(&self, event: EngineEvent) {
        let _ = self.events.send(Envelope {
            epoch: self.epoch,
            event,
        });
    }
}

pub struct Transition {
    pub scope: ViewScope,
    pub loaded: Result<(), ContentError>,
}

/// Swaps the displayed view. Every transition starts by cancelling all timers
/// of the previous view and opening a new epoch.
pub struct ViewTransitioner {
    epoch: Arc<AtomicU64>,
    events: mpsc::UnboundedSender<Envelope>,
    registry: TimerRegistry,
    clock: Arc<dyn TimeSource>,
    content: Arc<dyn ContentSource>,
    display: Arc<dyn DisplaySink>,
}

impl ViewTransitioner {
    pub fn new(
        events: mpsc::UnboundedSender<Envelope>,
        registry: TimerRegistry,
        clock: Arc<dyn TimeSource>,
        content: Arc<dyn ContentSource>,
        display: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            epoch: Arc::new(AtomicU64::new(0)),
            events,
            registry,
            clock,
            content,
            display,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    pub fn clock(&self) -> &Arc<dyn TimeSource> {
        &self.clock
    }

    /// Cancels the current view's timers and returns the scope of a new view
    /// without loading anything.
    pub fn begin(&mut self) -> ViewScope {
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        self.registry.clear_all();
        debug!(epoch, "view epoch opened");
        ViewScope {
            epoch,
            current: Arc::clone(&self.epoch),
            events: self.events.clone(),
            registry: self.registry.clone(),
            clock: Arc::clone(&self.clock),
            display: Arc::clone(&self.display),
        }
    }

    pub async fn transition(&mut self, path: &ContentPath) -> Transition {
        let scope = self.begin();
        let loaded = match self.content.fetch(path).await {
            Ok(markup) => {
                info!(%path, epoch = scope.epoch, "view loaded");
                self.display.show_markup(path, &markup);
                Ok(())
            }
            Err(err) => Err(err),
        };
        Transition { scope, loaded }
    }
}
