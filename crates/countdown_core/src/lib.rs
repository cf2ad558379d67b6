//! Fixed-offset (IST) countdown engine for a multi-day reveal page.
//!
//! The [`App`] state machine moves between the pre-event countdown, the
//! reveal screen and the daily view. Timers never drive transitions
//! directly; they post epoch-stamped events that the dispatch loop applies
//! after clearing the previous view's timers.

pub mod app;
pub mod content;
pub mod countdown;
pub mod daily_view;
pub mod error;
pub mod ist_clock;
pub mod reveal;
pub mod status;
pub mod theme;
pub mod time_source;
pub mod timer_registry;
pub mod transition;
pub mod window;

pub use app::{App, EngineConfig, EngineDeps};
pub use content::{source_for_location, DirContentSource, HttpContentSource};
pub use error::EngineError;
pub use status::{StatusReport, WindowState};
pub use theme::ThemeTable;
pub use time_source::{AnchoredTimeSource, SystemTimeSource, TimeSource};
pub use timer_registry::{TimerId, TimerRegistry};
pub use window::EventWindow;

#[cfg(test)]
pub(crate) mod test_support;
