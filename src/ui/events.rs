//! Background task event processing.

use crate::app::{App, AppEvent, FeedStatus};
use chrono::Utc;

/// Apply one event from a background task to the app state.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::FeedLoaded { generation, result } => {
            let failed = result.is_err();
            if !app.apply_load(generation, result, Utc::now()) {
                return;
            }
            if failed {
                app.set_status("Feed unavailable");
            } else {
                app.set_status(format!("Loaded {} news items", app.stats.total));
            }
        }
        AppEvent::TaskPanicked {
            generation,
            task,
            error,
        } => {
            tracing::error!(task, generation, error = %error, "Background task panicked");
            if generation != app.load_generation {
                tracing::debug!(
                    generation,
                    current = app.load_generation,
                    "Ignoring panic from superseded load"
                );
                return;
            }
            app.loading = false;
            if app.feed_status == FeedStatus::Loading {
                app.feed_status = FeedStatus::Failed(format!("Internal error: {}", error));
            }
            app.set_status(format!("Internal error in {}: {}", task, error));
        }
    }
}
