//! Client error taxonomy.

use thiserror::Error;
use waweb_page::PageError;

/// Errors raised by the scraping core.
///
/// Most of these are *expected* outcomes of driving a live UI — a contact
/// that does not exist, a panel that never opened — and the [`Client`]
/// facade maps them to `false`/empty results rather than propagating.
/// Only backend failures surface to callers as hard errors.
///
/// [`Client`]: crate::Client
#[derive(Debug, Error)]
pub enum ClientError {
    /// An expected element is absent from the page.
    #[error("element not found: {0}")]
    NotFound(String),

    /// A bounded wait elapsed.
    #[error("timed out: {0}")]
    Timeout(String),

    /// Navigation found several equally-ranked candidates.
    #[error("ambiguous match: {0}")]
    AmbiguousMatch(String),

    /// A message row had no recognized shape. Never fatal for a batch.
    #[error("unrecognized row shape: {0}")]
    ParseMismatch(String),

    /// The conversation panel did not open for the requested contact.
    #[error("could not open conversation: {0}")]
    NavigationFailure(String),

    /// Failure in the underlying page handle.
    #[error(transparent)]
    Page(PageError),
}

impl From<PageError> for ClientError {
    fn from(e: PageError) -> Self {
        match e {
            PageError::Timeout(msg) => ClientError::Timeout(msg),
            other => ClientError::Page(other),
        }
    }
}

impl ClientError {
    /// Whether this is a normal interactive outcome (contact not found,
    /// wait elapsed) rather than a real failure.
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            ClientError::NotFound(_)
                | ClientError::Timeout(_)
                | ClientError::AmbiguousMatch(_)
                | ClientError::NavigationFailure(_)
        )
    }
}
