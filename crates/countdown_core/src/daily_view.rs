use std::time::Duration;

use shared::domain::{ContentPath, Phase};
use tracing::{info, warn};

use crate::{
    countdown::DailyCountdownController, ist_clock, theme::ThemeTable,
    transition::ViewTransitioner,
};

pub const FALLBACK_MESSAGE: &str = "Nothing is scheduled for today. See you next February!";

/// Shows the content of the current day in the fixed zone.
pub struct DailyViewController;

impl DailyViewController {
    /// Loads today's fragment. A failed fetch renders [`FALLBACK_MESSAGE`]
    /// and ends in [`Phase::OutOfRange`]; it is never an error.
    pub async fn show(
        transitioner: &mut ViewTransitioner,
        themes: &ThemeTable,
        tick: Duration,
    ) -> Phase {
        // Key and rollover target share one clock reading; a fetch that
        // crosses midnight then rolls over on the first tick.
        let now = transitioner.clock().now();
        let key = ist_clock::today_key(now);
        let next_midnight = ist_clock::next_zone_midnight(now);
        let path = ContentPath::for_day(&key);
        let transition = transitioner.transition(&path).await;
        let scope = transition.scope;

        if let Err(err) = transition.loaded {
            warn!(
                %key,
                code = ?err.code(),
                error = %err,
                "no content for today, showing fallback"
            );
            scope.display.apply_theme(None);
            scope.display.show_fallback(FALLBACK_MESSAGE);
            return Phase::OutOfRange { key };
        }

        let theme = themes.lookup(&key).cloned();
        scope.display.apply_theme(theme.as_ref());
        DailyCountdownController::start(&scope, next_midnight, tick);
        info!(%key, theme = ?theme, %next_midnight, "daily view shown");
        Phase::Daily { key, theme }
    }
}
