//! Message row parsing.
//!
//! A conversation row arrives in one of several mutually exclusive layouts
//! depending on render path (plain text, media, system notice, day
//! separator). The parser runs a fixed fallback chain per field and never
//! fails a row: unrecognized structure degrades to empty/placeholder
//! fields, and the caller decides what to keep.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;
use waweb_page::{PageError, PageNode};

use crate::model::{Message, Sender};
use crate::selectors::Selectors;

/// `data-pre-plain-text` carries `"[<time>] <sender>: "`.
static PRE_PLAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\] (.*?):\s*$").expect("pre-plain regex"));

/// Split a `data-pre-plain-text` attribute into (time, sender).
pub(crate) fn parse_pre_plain(value: &str) -> Option<(String, String)> {
    let caps = PRE_PLAIN_RE.captures(value)?;
    Some((caps[1].trim().to_string(), caps[2].trim().to_string()))
}

/// Parse one row node into a [`Message`].
///
/// Field fallback order:
/// 1. body from the selectable-text node, else empty;
/// 2. sender and time from the structured pre-plain-text attribute, else
///    from the separately-styled sender/time spans;
/// 3. an outgoing marker overrides the sender to [`Sender::You`] no matter
///    what step 2 found;
/// 4. a still-unknown sender becomes the fixed placeholder.
///
/// Page-handle failures (a row detaching mid-read) propagate; they are the
/// caller's cue to skip the row, not abort the batch.
pub async fn parse_row<N: PageNode>(selectors: &Selectors, row: &N) -> Result<Message, PageError> {
    let mut message = Message::default();

    if let Some(body) = row.query_selector(&selectors.message_body).await? {
        message.body = body.inner_text().await?.trim().to_string();
    }

    match row.query_selector(&selectors.pre_plain_text).await? {
        Some(structured) => {
            if let Some(attr) = structured.attribute("data-pre-plain-text").await? {
                if let Some((time, sender)) = parse_pre_plain(&attr) {
                    message.timestamp_text = time;
                    message.sender = Sender::Contact(sender);
                } else {
                    trace!("unparseable pre-plain-text: {:?}", attr);
                }
            }
        }
        None => {
            if let Some(sender) = row.query_selector(&selectors.sender_fallback).await? {
                let name = sender.inner_text().await?.trim().to_string();
                if !name.is_empty() {
                    message.sender = Sender::Contact(name);
                }
            }
            if let Some(time) = row.query_selector(&selectors.time_fallback).await? {
                message.timestamp_text = time.inner_text().await?.trim().to_string();
            }
        }
    }

    // Outgoing rows never carry the user's own name; the marker is the only
    // direction signal and it wins over any sender text found above.
    if row
        .query_selector(&selectors.outgoing_marker)
        .await?
        .is_some()
    {
        message.sender = Sender::You;
    }

    message.sender = message.sender.normalized();
    Ok(message)
}

/// Whether the row carries a file/media indicator.
pub async fn has_attachment<N: PageNode>(
    selectors: &Selectors,
    row: &N,
) -> Result<bool, PageError> {
    Ok(row
        .query_selector(&selectors.attachment_icons)
        .await?
        .is_some())
}

#[cfg(test)]
#[path = "row_tests.rs"]
mod tests;
