use chrono::{DateTime, TimeDelta, Utc};

/// The only way the engine learns the current instant.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Reports `anchor` plus the time elapsed on the tokio clock since creation.
///
/// Under a paused tokio runtime this advances exactly with the virtual clock,
/// which keeps timer-driven tests deterministic.
#[derive(Debug, Clone, Copy)]
pub struct AnchoredTimeSource {
    anchor: DateTime<Utc>,
    started: tokio::time::Instant,
}

impl AnchoredTimeSource {
    pub fn new(anchor: DateTime<Utc>) -> Self {
        Self {
            anchor,
            started: tokio::time::Instant::now(),
        }
    }
}

impl TimeSource for AnchoredTimeSource {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = TimeDelta::from_std(self.started.elapsed()).unwrap_or(TimeDelta::MAX);
        self.anchor
            .checked_add_signed(elapsed)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
