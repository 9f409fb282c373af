//! Attachment metadata extraction.
//!
//! Runs only on rows already flagged by the attachment icon union. Every
//! sub-element is looked up independently; whatever is missing stays
//! unresolved. Partial metadata is the normal case, not a failure.

use tracing::trace;
use waweb_page::{PageError, PageNode};

use crate::model::{Attachment, AttachmentKind};
use crate::selectors::Selectors;

/// Extract attachment metadata from a flagged row.
pub async fn extract_attachment<N: PageNode>(
    selectors: &Selectors,
    row: &N,
) -> Result<Attachment, PageError> {
    let name = match row.query_selector(&selectors.attachment_download).await? {
        Some(download) => match download.query_selector(&selectors.attachment_name).await? {
            Some(span) => Some(span.inner_text().await?.trim().to_string()),
            None => None,
        },
        None => None,
    };

    let kind = match row.query_selector(&selectors.attachment_kind).await? {
        Some(span) => span
            .attribute("title")
            .await?
            .map(|t| AttachmentKind::from_title(&t))
            .unwrap_or(AttachmentKind::Unrecognized),
        None => AttachmentKind::Unrecognized,
    };

    let size_text = match row.query_selector(&selectors.attachment_size).await? {
        Some(span) => span.attribute("title").await?,
        None => None,
    };

    let extra_text = match row.query_selector(&selectors.attachment_pages).await? {
        Some(span) => span.attribute("title").await?,
        None => None,
    };

    trace!(?name, ?kind, "extracted attachment metadata");

    Ok(Attachment {
        name,
        kind,
        size_text,
        extra_text,
    })
}
