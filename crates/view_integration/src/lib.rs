use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{ClockParts, ContentPath, CountdownParts, ThemeId},
    error::ContentError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CountdownDisplay {
    UntilStart(CountdownParts),
    UntilMidnight(ClockParts),
    Reveal { seconds_left: u32 },
}

/// Source of markup fragments addressed by path.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, path: &ContentPath) -> Result<String, ContentError>;
}

/// Whatever currently presents the page. Implementations must not block.
pub trait DisplaySink: Send + Sync {
    fn show_markup(&self, path: &ContentPath, markup: &str);
    fn apply_theme(&self, theme: Option<&ThemeId>);
    fn show_countdown(&self, display: CountdownDisplay);
    fn show_fallback(&self, message: &str);
}
