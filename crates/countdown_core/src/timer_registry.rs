use std::{
    collections::BTreeMap,
    fmt,
    future::Future,
    sync::{Arc, Mutex, MutexGuard},
};

use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

struct RegisteredTimer {
    label: &'static str,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct RegistryState {
    next_id: u64,
    timers: BTreeMap<TimerId, RegisteredTimer>,
}

/// Every repeating or one-shot timer the engine starts.
///
/// Cloning yields another handle onto the same set.
#[derive(Clone, Default)]
pub struct TimerRegistry {
    inner: Arc<Mutex<RegistryState>>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, RegistryState> {
        // A poisoned lock only means a timer task panicked mid-update; the map
        // itself is still consistent.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Spawns `make(id)` as a tokio task and records it under `id`.
    ///
    /// The entry exists before the task can observe the registry, so a task
    /// may safely `release` itself at any point.
    pub fn spawn<F, Fut>(&self, label: &'static str, make: F) -> TimerId
    where
        F: FnOnce(TimerId) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut state = self.state();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let handle = tokio::spawn(make(id));
        state.timers.insert(id, RegisteredTimer { label, handle });
        debug!(%id, label, live = state.timers.len(), "timer registered");
        id
    }

    pub fn register(&self, label: &'static str, handle: JoinHandle<()>) -> TimerId {
        let mut state = self.state();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        state.timers.insert(id, RegisteredTimer { label, handle });
        debug!(%id, label, live = state.timers.len(), "timer registered");
        id
    }

    /// Drops the entry of a timer that stopped on its own.
    pub fn release(&self, id: TimerId) {
        let mut state = self.state();
        if let Some(timer) = state.timers.remove(&id) {
            debug!(%id, label = timer.label, "timer released");
        }
    }

    /// Aborts every registered timer and empties the set.
    pub fn clear_all(&self) {
        let drained = std::mem::take(&mut self.state().timers);
        if drained.is_empty() {
            return;
        }
        let cleared = drained.len();
        for timer in drained.into_values() {
            timer.handle.abort();
        }
        debug!(cleared, "cleared all timers");
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.state().timers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.state().timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.state().timers.values().map(|timer| timer.label).collect()
    }
}

impl fmt::Debug for TimerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerRegistry")
            .field("live", &self.labels())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/timer_registry_tests.rs"]
mod tests;
