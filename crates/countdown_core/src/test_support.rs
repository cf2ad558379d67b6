use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{
    domain::{ContentPath, ThemeId},
    error::ContentError,
};
use view_integration::{ContentSource, CountdownDisplay, DisplaySink};

use crate::timer_registry::TimerRegistry;

pub(crate) fn utc(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("rfc3339")
        .with_timezone(&Utc)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Shown {
    Markup(String),
    Theme(Option<ThemeId>),
    Countdown(CountdownDisplay),
    Fallback(String),
}

#[derive(Default)]
pub(crate) struct RecordingDisplay {
    shown: Mutex<Vec<Shown>>,
}

impl RecordingDisplay {
    pub(crate) fn shown(&self) -> Vec<Shown> {
        self.shown.lock().expect("display lock").clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.shown.lock().expect("display lock").len()
    }

    pub(crate) fn since(&self, index: usize) -> Vec<Shown> {
        self.shown()[index..].to_vec()
    }

    fn push(&self, shown: Shown) {
        self.shown.lock().expect("display lock").push(shown);
    }
}

impl DisplaySink for RecordingDisplay {
    fn show_markup(&self, path: &ContentPath, _markup: &str) {
        self.push(Shown::Markup(path.to_string()));
    }

    fn apply_theme(&self, theme: Option<&ThemeId>) {
        self.push(Shown::Theme(theme.cloned()));
    }

    fn show_countdown(&self, display: CountdownDisplay) {
        self.push(Shown::Countdown(display));
    }

    fn show_fallback(&self, message: &str) {
        self.push(Shown::Fallback(message.to_string()));
    }
}

/// In-memory fragments. Optionally records how many timers were live each
/// time a fetch started, and can answer slowly.
#[derive(Default)]
pub(crate) struct MapContent {
    pages: HashMap<String, String>,
    latency: Option<Duration>,
    watched: OnceLock<TimerRegistry>,
    live_at_fetch: Mutex<Vec<(String, usize)>>,
}

impl MapContent {
    pub(crate) fn with_pages<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            pages: paths
                .into_iter()
                .map(|path| (path.to_string(), format!("<section>{path}</section>")))
                .collect(),
            ..Self::default()
        }
    }

    pub(crate) fn valentine_site() -> Self {
        Self::with_pages([
            "views/countdown.html",
            "views/reveal.html",
            "days/02-03.html",
            "days/02-04.html",
            "days/02-14.html",
        ])
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub(crate) fn watch(&self, registry: &TimerRegistry) {
        let _ = self.watched.set(registry.clone());
    }

    pub(crate) fn live_at_fetch(&self) -> Vec<(String, usize)> {
        self.live_at_fetch.lock().expect("fetch log lock").clone()
    }
}

#[async_trait]
impl ContentSource for MapContent {
    async fn fetch(&self, path: &ContentPath) -> Result<String, ContentError> {
        if let Some(registry) = self.watched.get() {
            self.live_at_fetch
                .lock()
                .expect("fetch log lock")
                .push((path.to_string(), registry.len()));
        }
        match self.latency {
            Some(latency) => tokio::time::sleep(latency).await,
            None => tokio::task::yield_now().await,
        }
        self.pages
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| ContentError::NotFound {
                path: path.to_string(),
            })
    }
}

pub(crate) fn shared_doubles(content: MapContent) -> (Arc<MapContent>, Arc<RecordingDisplay>) {
    (Arc::new(content), Arc::new(RecordingDisplay::default()))
}
