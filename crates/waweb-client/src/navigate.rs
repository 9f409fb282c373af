//! Conversation navigation.
//!
//! Opens a conversation by typing into the sidebar search box and pressing
//! Enter, then verifies the panel header actually names the requested
//! contact. Search is how the application itself routes; direct URL
//! navigation exists only for the phone-number path.

use tracing::{debug, warn};
use waweb_page::{PageError, PageHandle, PageNode};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transform::transform_offset;

/// Open the conversation for `contact` via sidebar search.
///
/// Returns the name shown in the opened panel header. The header must
/// case-insensitively start with the query, otherwise search landed on a
/// different conversation and [`ClientError::NavigationFailure`] is
/// returned without sending anything.
pub async fn open_conversation<P: PageHandle>(
    page: &P,
    config: &ClientConfig,
    contact: &str,
) -> Result<String, ClientError> {
    let selectors = &config.selectors;

    let search = page
        .wait_for_selector(&selectors.search_input, config.wait_timeout())
        .await?;
    search.click().await?;

    // Clear leftover text from a previous search.
    page.press_key(&config.select_all_key).await?;
    page.press_key("Backspace").await?;

    page.type_text(contact, config.type_delay()).await?;
    page.press_key("Enter").await?;

    let header = page
        .wait_for_selector(&selectors.panel_header_name, config.wait_timeout())
        .await?;
    let header_name = header.inner_text().await?.trim().to_string();

    if !header_name.to_lowercase().starts_with(&contact.to_lowercase()) {
        warn!(
            "Search for '{}' opened panel '{}' instead",
            contact, header_name
        );
        return Err(ClientError::NavigationFailure(format!(
            "expected a conversation starting with '{contact}', got '{header_name}'"
        )));
    }

    debug!("Opened conversation '{}'", header_name);
    Ok(header_name)
}

/// Resolve a search query to exactly one sidebar contact name.
///
/// Types the query, waits for the result list to settle, and reads back
/// the entries sitting at the first-result transform offset. Zero matches
/// is [`ClientError::NotFound`], more than one is
/// [`ClientError::AmbiguousMatch`].
pub async fn resolve_contact<P: PageHandle>(
    page: &P,
    config: &ClientConfig,
    query: &str,
) -> Result<String, ClientError> {
    let selectors = &config.selectors;

    let search = page
        .wait_for_selector(&selectors.search_input, config.wait_timeout())
        .await?;
    search.click().await?;
    page.press_key(&config.select_all_key).await?;
    page.press_key("Backspace").await?;
    page.type_text(query, config.type_delay()).await?;

    tokio::time::sleep(config.search_settle()).await;

    let results = page
        .query_selector(&selectors.search_results)
        .await?
        .ok_or_else(|| ClientError::NotFound(format!("no search results for '{query}'")))?;

    let items = results.query_selector_all(&selectors.list_item).await?;
    let mut matches = Vec::new();
    for item in &items {
        let offset = item
            .evaluate("el => window.getComputedStyle(el).transform")
            .await?
            .as_str()
            .and_then(transform_offset);
        if offset != Some(config.first_result_offset) {
            continue;
        }
        if let Some(span) = item.query_selector(&selectors.list_name).await? {
            matches.push(span.inner_text().await?.trim().to_string());
        }
    }

    match matches.as_slice() {
        [] => Err(ClientError::NotFound(format!(
            "no contact matched '{query}'"
        ))),
        [name] => Ok(name.clone()),
        _ => Err(ClientError::AmbiguousMatch(format!(
            "'{query}' matched {} contacts: {}",
            matches.len(),
            matches.join(", ")
        ))),
    }
}

/// Open a conversation by phone number via the send URL.
///
/// Navigation into a fresh conversation can race the application shell;
/// the panel wait is retried a bounded number of times with a doubling
/// backoff before the failure propagates.
pub async fn open_by_phone<P: PageHandle>(
    page: &P,
    config: &ClientConfig,
    phone: &str,
) -> Result<(), ClientError> {
    let url = config.phone_url(phone);
    let mut backoff = config.phone_retry_backoff();

    for attempt in 1..=config.phone_retry_attempts {
        page.goto(&url).await?;
        match page
            .wait_for_selector(&config.selectors.chat_panel, config.wait_timeout())
            .await
        {
            Ok(_) => {
                debug!("Opened conversation for phone {} on attempt {}", phone, attempt);
                return Ok(());
            }
            Err(PageError::Timeout(_)) => {
                if attempt < config.phone_retry_attempts {
                    warn!(
                        "Panel did not appear for phone {} (attempt {}), retrying in {:?}",
                        phone, attempt, backoff
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(ClientError::NavigationFailure(format!(
        "conversation for phone {phone} never opened after {} attempts",
        config.phone_retry_attempts
    )))
}
