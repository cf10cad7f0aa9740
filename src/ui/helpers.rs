//! Helper functions for UI operations.
//!
//! Background task spawning and panic containment shared by the input
//! handlers and the event loop.

use crate::app::{App, AppEvent};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Task name reported when the feed load panics.
pub(super) const FEED_LOAD_TASK: &str = "feed_load";

/// Wraps a future to catch panics and convert them to errors.
///
/// Instead of the task silently disappearing (caught by Tokio's runtime but
/// not handled), panics are converted to `Err(String)` containing the panic
/// message.
///
/// # Returns
///
/// - `Ok(result)` if the future completes normally
/// - `Err(panic_message)` if the future panics
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else if let Some(e) = panic.downcast_ref::<Box<dyn std::error::Error + Send>>() {
                e.to_string()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Spawn a feed load tagged with a fresh generation.
///
/// Earlier loads still in flight are left to finish; their results are
/// discarded when they arrive because their generation is stale.
pub(super) fn spawn_feed_load(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let generation = app.begin_load();
    let loader = app.loader.clone();
    let tx = event_tx.clone();

    tracing::debug!(generation, source = %loader.source(), "Spawning feed load");

    tokio::spawn(async move {
        let event = match catch_task_panic(loader.load()).await {
            Ok(result) => AppEvent::FeedLoaded { generation, result },
            Err(panic_msg) => {
                tracing::error!(task = FEED_LOAD_TASK, error = %panic_msg, "Background task panicked");
                AppEvent::TaskPanicked {
                    generation,
                    task: FEED_LOAD_TASK,
                    error: panic_msg,
                }
            }
        };

        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, event = "FeedLoaded", "Channel send failed (receiver dropped)");
        }
    });
}
