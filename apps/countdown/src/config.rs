use std::{
    collections::HashMap,
    fs, io,
    path::Path,
    time::Duration,
};

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use countdown_core::{
    app::EngineConfig, ist_clock, reveal::RevealSettings, EventWindow, ThemeTable,
};
use serde::Deserialize;
use shared::domain::{DayKey, ThemeId};

pub const DEFAULT_CONFIG_FILE: &str = "countdown.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory or `http(s)://` base the fragments are loaded from.
    pub content_base: String,
    /// Window year; resolved from the universal clock when unset.
    pub year: Option<i32>,
    /// 1-based month of the window.
    pub month: u32,
    pub start_day: u32,
    pub end_day: u32,
    pub entry_delay_ms: u64,
    pub reveal_seconds: u32,
    /// Replaces the built-in theme table when non-empty.
    pub themes: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            content_base: "./site".into(),
            year: None,
            month: 2,
            start_day: 3,
            end_day: 14,
            entry_delay_ms: 800,
            reveal_seconds: 20,
            themes: HashMap::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    content_base: Option<String>,
    year: Option<i32>,
    month: Option<u32>,
    start_day: Option<u32>,
    end_day: Option<u32>,
    entry_delay_ms: Option<u64>,
    reveal_seconds: Option<u32>,
    #[serde(default)]
    themes: HashMap<String, String>,
}

/// Defaults, then the TOML file, then `APP__*` environment variables.
/// A missing file is fine when no explicit path was given.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(path) {
        Ok(raw) => {
            apply_file(&mut settings, &raw)
                .with_context(|| format!("invalid settings file '{}'", path.display()))?;
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()));
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file.content_base {
        settings.content_base = v;
    }
    if let Some(v) = file.year {
        settings.year = Some(v);
    }
    if let Some(v) = file.month {
        settings.month = v;
    }
    if let Some(v) = file.start_day {
        settings.start_day = v;
    }
    if let Some(v) = file.end_day {
        settings.end_day = v;
    }
    if let Some(v) = file.entry_delay_ms {
        settings.entry_delay_ms = v;
    }
    if let Some(v) = file.reveal_seconds {
        settings.reveal_seconds = v;
    }
    if !file.themes.is_empty() {
        settings.themes = file.themes;
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: String) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("invalid value '{raw}' for {key}"))
}

fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("APP__CONTENT_BASE") {
        settings.content_base = v;
    }
    if let Some(v) = lookup("APP__YEAR") {
        settings.year = Some(parse_env("APP__YEAR", v)?);
    }
    if let Some(v) = lookup("APP__MONTH") {
        settings.month = parse_env("APP__MONTH", v)?;
    }
    if let Some(v) = lookup("APP__START_DAY") {
        settings.start_day = parse_env("APP__START_DAY", v)?;
    }
    if let Some(v) = lookup("APP__END_DAY") {
        settings.end_day = parse_env("APP__END_DAY", v)?;
    }
    if let Some(v) = lookup("APP__ENTRY_DELAY_MS") {
        settings.entry_delay_ms = parse_env("APP__ENTRY_DELAY_MS", v)?;
    }
    if let Some(v) = lookup("APP__REVEAL_SECONDS") {
        settings.reveal_seconds = parse_env("APP__REVEAL_SECONDS", v)?;
    }
    Ok(())
}

impl Settings {
    pub fn theme_table(&self) -> anyhow::Result<ThemeTable> {
        if self.themes.is_empty() {
            return Ok(ThemeTable::default());
        }
        let mut entries = Vec::with_capacity(self.themes.len());
        for (key, theme) in &self.themes {
            let Some(day) = DayKey::parse(key) else {
                bail!("theme key '{key}' is not in MM-DD form");
            };
            entries.push((day, ThemeId::new(theme.clone())));
        }
        Ok(ThemeTable::from_entries(entries))
    }

    /// Resolves the window year (once) and validates everything else.
    pub fn engine_config(&self, now: DateTime<Utc>) -> anyhow::Result<EngineConfig> {
        if !(1..=12).contains(&self.month) {
            bail!("month must be between 1 and 12, got {}", self.month);
        }
        let year = self.year.unwrap_or_else(|| ist_clock::universal_year(now));
        let window = EventWindow::new(year, self.month - 1, self.start_day, self.end_day)
            .context("invalid event window")?;

        let mut config = EngineConfig::new(window);
        config.entry_delay = Duration::from_millis(self.entry_delay_ms);
        config.reveal = RevealSettings {
            seconds: self.reveal_seconds,
        };
        config.themes = self.theme_table()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
