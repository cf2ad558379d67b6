//! Terminal rendering of the page.

use std::{
    io::{self, Write},
    sync::Mutex,
};

use shared::domain::{ContentPath, ThemeId};
use tracing::info;
use view_integration::{CountdownDisplay, DisplaySink};

#[derive(Default)]
pub struct TerminalDisplay {
    /// Whether the last line written is a countdown that may be overwritten.
    countdown_line: Mutex<bool>,
}

impl TerminalDisplay {
    fn write_block(&self, text: &str) {
        let mut countdown_line = self
            .countdown_line
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut out = io::stdout().lock();
        if *countdown_line {
            let _ = writeln!(out);
            *countdown_line = false;
        }
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }

    fn write_countdown(&self, text: &str) {
        let mut countdown_line = self
            .countdown_line
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut out = io::stdout().lock();
        let _ = write!(out, "\r\x1b[2K{text}");
        let _ = out.flush();
        *countdown_line = true;
    }
}

pub fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_countdown(display: &CountdownDisplay) -> String {
    match display {
        CountdownDisplay::UntilStart(parts) => format!("Starts in {parts}"),
        CountdownDisplay::UntilMidnight(parts) => format!("Next surprise in {parts}"),
        CountdownDisplay::Reveal { seconds_left } => format!("Revealing in {seconds_left}..."),
    }
}

impl DisplaySink for TerminalDisplay {
    fn show_markup(&self, path: &ContentPath, markup: &str) {
        info!(%path, bytes = markup.len(), "rendering fragment");
        self.write_block(&strip_tags(markup));
    }

    fn apply_theme(&self, theme: Option<&ThemeId>) {
        match theme {
            Some(theme) => self.write_block(&format!("[theme: {theme}]")),
            None => info!("theme cleared"),
        }
    }

    fn show_countdown(&self, display: CountdownDisplay) {
        self.write_countdown(&format_countdown(&display));
    }

    fn show_fallback(&self, message: &str) {
        self.write_block(message);
    }
}
