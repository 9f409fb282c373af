//! High-level client facade.
//!
//! Wraps a page handle and exposes the operations a caller actually wants:
//! send a message, read history, list and watch conversations. Expected
//! interactive outcomes (contact not found, panel never opened) come back
//! as `false`/empty; only backend failures propagate as errors.

use std::sync::Arc;

use tracing::{debug, info, warn};
use waweb_page::{PageHandle, PageNode};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::history::extract_messages;
use crate::model::{ConversationSummary, Message};
use crate::navigate::{open_by_phone, open_conversation, resolve_contact};
use crate::scroll::{load_until_stable, ScrollDirection};
use crate::sidebar::list_conversations;
use crate::watch::{watch_top_conversation, WatchHandle};

/// A connected messaging-web client over a page handle `P`.
pub struct Client<P: PageHandle> {
    page: Arc<P>,
    config: ClientConfig,
}

impl<P: PageHandle + 'static> Client<P> {
    pub fn new(page: P, config: ClientConfig) -> Self {
        Self {
            page: Arc::new(page),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Block until the application shell has rendered the sidebar.
    pub async fn wait_until_ready(&self) -> Result<(), ClientError> {
        self.page
            .wait_for_selector(&self.config.selectors.side_pane, self.config.wait_timeout())
            .await?;
        debug!("Application shell ready");
        Ok(())
    }

    // ========================================================================
    // Sending
    // ========================================================================

    /// Send `message` to `contact`.
    ///
    /// Returns `Ok(false)` when the conversation could not be opened (no
    /// such contact, ambiguous search, wrong panel); nothing is typed in
    /// that case. A hard page failure still errors.
    pub async fn send_message(&self, contact: &str, message: &str) -> Result<bool, ClientError> {
        let opened = match open_conversation(self.page.as_ref(), &self.config, contact).await {
            Ok(name) => name,
            Err(e) if e.is_benign() => {
                warn!("Not sending to '{}': {}", contact, e);
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        self.compose_and_send(message).await?;
        info!("Sent message to '{}'", opened);
        Ok(true)
    }

    /// Type `message` into the composer of the already-open conversation
    /// and dispatch it. Pair with [`Client::open_by_phone`] when there is
    /// no sidebar entry to search for.
    pub async fn send_to_open_conversation(&self, message: &str) -> Result<(), ClientError> {
        self.page
            .wait_for_selector(&self.config.selectors.chat_panel, self.config.wait_timeout())
            .await?;
        self.compose_and_send(message).await
    }

    async fn compose_and_send(&self, message: &str) -> Result<(), ClientError> {
        // The composer keeps per-conversation drafts across reopens; clear
        // any stale draft so it cannot prepend itself to the message.
        self.page.press_key(&self.config.select_all_key).await?;
        self.page.press_key("Backspace").await?;

        self.page
            .type_text(message, self.config.type_delay())
            .await?;
        self.page.press_key("Enter").await?;

        // The first Enter occasionally only commits the composer draft; a
        // second one after a beat reliably dispatches the message.
        tokio::time::sleep(self.config.settle_delay()).await;
        self.page.press_key("Enter").await?;
        Ok(())
    }

    /// Open a conversation by phone number instead of contact search.
    pub async fn open_by_phone(&self, phone: &str) -> Result<(), ClientError> {
        open_by_phone(self.page.as_ref(), &self.config, phone).await
    }

    /// Resolve a free-text query to exactly one contact name.
    pub async fn resolve_contact(&self, query: &str) -> Result<String, ClientError> {
        resolve_contact(self.page.as_ref(), &self.config, query).await
    }

    // ========================================================================
    // Reading
    // ========================================================================

    /// Last `limit` messages of `contact`'s conversation, oldest first.
    ///
    /// A conversation that cannot be opened yields an empty history.
    pub async fn extract_history(
        &self,
        contact: &str,
        limit: usize,
    ) -> Result<Vec<Message>, ClientError> {
        self.extract_history_inner(contact, limit, false).await
    }

    /// Like [`Client::extract_history`], but first scrolls the conversation
    /// back toward its oldest content so more rows are rendered.
    pub async fn extract_full_history(
        &self,
        contact: &str,
        limit: usize,
    ) -> Result<Vec<Message>, ClientError> {
        self.extract_history_inner(contact, limit, true).await
    }

    async fn extract_history_inner(
        &self,
        contact: &str,
        limit: usize,
        load_older: bool,
    ) -> Result<Vec<Message>, ClientError> {
        match open_conversation(self.page.as_ref(), &self.config, contact).await {
            Ok(_) => {}
            Err(e) if e.is_benign() => {
                warn!("No history for '{}': {}", contact, e);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        }

        if load_older {
            self.load_older_messages().await?;
        }

        let mut messages = extract_messages(self.page.as_ref(), &self.config).await?;
        if messages.len() > limit {
            messages.drain(..messages.len() - limit);
        }
        Ok(messages)
    }

    /// Scroll the open conversation toward its oldest rendered content.
    pub async fn load_older_messages(&self) -> Result<bool, ClientError> {
        load_until_stable(
            self.page.as_ref(),
            &self.config,
            &self.config.selectors.chat_panel,
            ScrollDirection::TowardOrigin,
        )
        .await
    }

    // ========================================================================
    // Sidebar
    // ========================================================================

    /// All sidebar conversations in display order. A missing sidebar (page
    /// still loading, logged out) yields an empty list.
    pub async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ClientError> {
        match list_conversations(self.page.as_ref(), &self.config).await {
            Ok(summaries) => Ok(summaries),
            Err(e) if e.is_benign() => {
                warn!("Sidebar unavailable: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Scroll the sidebar until every conversation entry has been rendered.
    pub async fn load_all_conversations(&self) -> Result<bool, ClientError> {
        load_until_stable(
            self.page.as_ref(),
            &self.config,
            &self.config.selectors.side_pane,
            ScrollDirection::TowardContent,
        )
        .await
    }

    /// Close the open conversation via its header menu.
    ///
    /// Opens the second menu button (the panel's, not the sidebar's) and
    /// walks down to the close item with the keyboard.
    pub async fn close_conversation(&self) -> Result<(), ClientError> {
        let menus = self.page.query_selector_all("div[aria-label='Menu']").await?;
        let Some(menu) = menus.get(1) else {
            warn!("No conversation menu to close");
            return Ok(());
        };
        menu.click().await?;
        tokio::time::sleep(self.config.settle_delay()).await;
        self.page.press_key("ArrowDown").await?;
        self.page.press_key("ArrowDown").await?;
        self.page.press_key("Enter").await?;
        Ok(())
    }

    // ========================================================================
    // Watching
    // ========================================================================

    /// Start watching the topmost sidebar entry for changes.
    pub fn watch(&self) -> WatchHandle {
        watch_top_conversation(Arc::clone(&self.page), self.config.clone())
    }

    /// Invoke `handler` for every detected sidebar change until it returns
    /// `false` or the watcher is cancelled externally.
    pub async fn watch_for_new_message<F>(&self, mut handler: F)
    where
        F: FnMut(ConversationSummary) -> bool + Send,
    {
        let mut watch = self.watch();
        while let Some(change) = watch.changed().await {
            if !handler(change) {
                watch.cancel();
                break;
            }
        }
    }
}
