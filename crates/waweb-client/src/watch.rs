//! Change-detection polling.
//!
//! Watches the topmost sidebar entry and reports whenever it changes. The
//! watcher runs on its own task and hands changes over an mpsc channel;
//! cancellation is explicit via [`CancellationToken`], so a consumer can
//! stop the loop without tearing down the page session.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use waweb_page::PageHandle;

use crate::config::ClientConfig;
use crate::model::ConversationSummary;
use crate::sidebar::top_conversation;

/// A running sidebar watcher.
///
/// Dropping the handle cancels the polling task.
pub struct WatchHandle {
    rx: mpsc::Receiver<ConversationSummary>,
    cancel: CancellationToken,
}

impl WatchHandle {
    /// Next detected change, or `None` once the watcher has stopped.
    pub async fn changed(&mut self) -> Option<ConversationSummary> {
        self.rx.recv().await
    }

    /// Stop the polling task.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Start polling the topmost sidebar entry for changes.
///
/// The first observation establishes a baseline and is not emitted; every
/// subsequent tick whose topmost entry differs from the previous one is.
/// Per-tick read failures are logged and skipped, the loop keeps running.
pub fn watch_top_conversation<P>(
    page: Arc<P>,
    config: ClientConfig,
) -> WatchHandle
where
    P: PageHandle + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(config.poll_interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut baseline: Option<ConversationSummary> = None;
        loop {
            tokio::select! {
                _ = task_cancel.cancelled() => {
                    debug!("Sidebar watcher cancelled");
                    return;
                }
                _ = interval.tick() => {}
            }

            let current = match top_conversation(page.as_ref(), &config).await {
                Ok(current) => current,
                Err(e) => {
                    warn!("Sidebar poll failed, will retry: {}", e);
                    continue;
                }
            };

            let Some(current) = current else { continue };

            match &baseline {
                // First successful read only seeds the comparison.
                None => baseline = Some(current),
                Some(previous) if *previous != current => {
                    debug!("Topmost conversation changed: {}", current.contact_name);
                    baseline = Some(current.clone());
                    if tx.send(current).await.is_err() {
                        return;
                    }
                }
                Some(_) => {}
            }
        }
    });

    WatchHandle { rx, cancel }
}
