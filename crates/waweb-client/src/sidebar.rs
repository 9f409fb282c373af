//! Chat-list synchronization.
//!
//! Rebuilds the full set of sidebar conversation summaries on every call,
//! in true display order. Display order is recovered from each entry's CSS
//! transform offset (see [`crate::transform`]); DOM order is an artifact of
//! the virtualized list and is never trusted.

use tracing::{debug, warn};
use waweb_page::{PageError, PageHandle, PageNode};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::{ConversationSummary, FlatEntry};
use crate::transform::transform_offset;

/// Sort key for entries whose transform did not resolve: they sort last
/// rather than failing the batch.
const UNORDERED: f64 = f64::INFINITY;

/// Parse an unread badge label, zero when non-numeric.
pub(crate) fn parse_unread(text: &str) -> u32 {
    text.split_whitespace()
        .next()
        .and_then(|tok| tok.parse().ok())
        .unwrap_or(0)
}

/// Extract all sidebar conversation summaries in display order.
pub async fn list_conversations<P: PageHandle>(
    page: &P,
    config: &ClientConfig,
) -> Result<Vec<ConversationSummary>, ClientError> {
    let selectors = &config.selectors;

    let list = page
        .query_selector(&selectors.chat_list)
        .await?
        .ok_or_else(|| ClientError::NotFound(selectors.chat_list.clone()))?;

    let items = list.query_selector_all(&selectors.list_item).await?;
    debug!("Synchronizing {} sidebar entries", items.len());

    let mut summaries = Vec::with_capacity(items.len());
    for item in &items {
        match read_entry(selectors, item).await {
            Ok(Some(summary)) => summaries.push(summary),
            Ok(None) => {}
            Err(e) => warn!("Skipping unreadable sidebar entry: {}", e),
        }
    }

    // Smallest offset = topmost = most recently active. Unordered entries
    // (infinite key) fall to the end.
    summaries.sort_by(|a, b| {
        a.order_key
            .partial_cmp(&b.order_key)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(summaries)
}

/// Topmost (most recently active) conversation, if the sidebar has any.
pub async fn top_conversation<P: PageHandle>(
    page: &P,
    config: &ClientConfig,
) -> Result<Option<ConversationSummary>, ClientError> {
    Ok(list_conversations(page, config).await?.into_iter().next())
}

/// Read one sidebar entry; `None` means the entry had no recognized shape
/// and has already been logged.
async fn read_entry<N: PageNode>(
    selectors: &crate::selectors::Selectors,
    item: &N,
) -> Result<Option<ConversationSummary>, PageError> {
    let order_key = item
        .evaluate("el => window.getComputedStyle(el).transform")
        .await?
        .as_str()
        .and_then(transform_offset)
        .unwrap_or(UNORDERED);

    // Render path without the structured sub-nodes: decode the entry's flat
    // newline-joined text instead.
    let Some(name_span) = item.query_selector(&selectors.list_name).await? else {
        let flat = parse_flat_entry(&item.inner_text().await?);
        return Ok(flat.map(|flat| ConversationSummary {
            contact_name: flat.sender,
            preview_text: flat.message,
            timestamp_text: flat.time,
            unread_count: flat.no_of_unread,
            order_key,
        }));
    };

    let contact_name = name_span.inner_text().await?.trim().to_string();

    let preview_text = match item.query_selector(&selectors.list_preview).await? {
        Some(span) => span.inner_text().await?.trim().to_string(),
        None => String::new(),
    };

    let timestamp_text = match item.query_selector(&selectors.list_time).await? {
        Some(span) => span.inner_text().await?.trim().to_string(),
        None => String::new(),
    };

    let unread_count = match item.query_selector(&selectors.unread_badge).await? {
        Some(badge) => parse_unread(&badge.inner_text().await?),
        None => 0,
    };

    Ok(Some(ConversationSummary {
        contact_name,
        preview_text,
        timestamp_text,
        unread_count,
        order_key,
    }))
}

// ============================================================================
// Flat entry decoding
// ============================================================================

/// Decode a sidebar entry from its newline-joined inner text.
///
/// Fallback for render paths where the structured sub-nodes are missing.
/// The entry's text splits into 2–6 segments; the shape is identified by
/// arity, with the trailing-number check separating the two four-segment
/// shapes:
///
/// | segments | mapping                                        |
/// |----------|------------------------------------------------|
/// | 2        | name, time                                     |
/// | 3        | name, time, message                            |
/// | 4 (numeric tail) | name, time, message, unread count      |
/// | 4        | name, time, author, message (group)            |
/// | 5        | name, time, author, message, unread (group)    |
/// | 6        | name, time, author, message, unread, status (group) |
///
/// Group and direct chats go through the same table; a group entry is just
/// a shape that carries an author segment. An unrecognized shape is logged
/// and excluded, never raised.
pub fn parse_flat_entry(text: &str) -> Option<FlatEntry> {
    let segments: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let entry = match segments.as_slice() {
        [name, time] => FlatEntry {
            sender: name.to_string(),
            time: time.to_string(),
            message: String::new(),
            unread: false,
            no_of_unread: 0,
            group: false,
        },
        [name, time, message] => FlatEntry {
            sender: name.to_string(),
            time: time.to_string(),
            message: message.to_string(),
            unread: false,
            no_of_unread: 0,
            group: false,
        },
        [name, time, message, count] if count.parse::<u32>().is_ok() => FlatEntry {
            sender: name.to_string(),
            time: time.to_string(),
            message: message.to_string(),
            unread: true,
            no_of_unread: count.parse().unwrap_or(0),
            group: false,
        },
        [name, time, author, message] => FlatEntry {
            sender: name.to_string(),
            time: time.to_string(),
            message: format!("{}: {}", author, message),
            unread: false,
            no_of_unread: 0,
            group: true,
        },
        [name, time, author, message, count] if count.parse::<u32>().is_ok() => FlatEntry {
            sender: name.to_string(),
            time: time.to_string(),
            message: format!("{}: {}", author, message),
            unread: true,
            no_of_unread: count.parse().unwrap_or(0),
            group: true,
        },
        [name, time, author, message, count, _status] if count.parse::<u32>().is_ok() => {
            FlatEntry {
                sender: name.to_string(),
                time: time.to_string(),
                message: format!("{}: {}", author, message),
                unread: true,
                no_of_unread: count.parse().unwrap_or(0),
                group: true,
            }
        }
        _ => {
            warn!("Unrecognized sidebar entry shape ({} segments)", segments.len());
            return None;
        }
    };

    Some(entry)
}

#[cfg(test)]
#[path = "sidebar_tests.rs"]
mod tests;
