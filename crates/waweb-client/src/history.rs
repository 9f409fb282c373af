//! Message extraction pipeline.
//!
//! Reads every visible row in the open conversation panel and normalizes
//! it. Rows are independent, so per-row extraction fans out concurrently;
//! [`futures::future::join_all`] keeps the output in panel order no matter
//! which extraction finishes first. A row that fails to normalize is
//! logged and skipped, never fatal to the batch.

use futures::future::join_all;
use tracing::{debug, warn};
use waweb_page::{PageError, PageHandle, PageNode};

use crate::attachment::extract_attachment;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::Message;
use crate::row::{has_attachment, parse_row};
use crate::selectors::Selectors;

/// Extract all currently rendered messages in chronological order.
///
/// Requires an open conversation panel; waits for it up to the configured
/// timeout before reading rows.
pub async fn extract_messages<P: PageHandle>(
    page: &P,
    config: &ClientConfig,
) -> Result<Vec<Message>, ClientError> {
    let selectors = &config.selectors;

    page.wait_for_selector(&selectors.chat_panel, config.wait_timeout())
        .await?;

    let rows = page.query_selector_all(&selectors.message_row).await?;
    debug!("Extracting {} message rows", rows.len());

    let extractions = rows.iter().map(|row| extract_one(selectors, row));
    let results = join_all(extractions).await;

    let mut messages = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(message) => messages.push(message),
            Err(e) => warn!("Skipping unreadable message row: {}", e),
        }
    }

    Ok(messages)
}

async fn extract_one<N: PageNode>(selectors: &Selectors, row: &N) -> Result<Message, PageError> {
    let mut message = parse_row(selectors, row).await?;
    if has_attachment(selectors, row).await? {
        message.attachment = Some(extract_attachment(selectors, row).await?);
    }
    Ok(message)
}
