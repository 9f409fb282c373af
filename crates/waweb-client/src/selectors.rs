//! The selector table: WhatsApp Web's markup treated as a versioned contract.
//!
//! The UI ships no schema and no version negotiation; these selectors *are*
//! the compatibility surface. They are collected here, and only here, so
//! that UI drift is fixed by editing one table instead of hunting call
//! sites. Values current as of the 2025 web client; the obfuscated class
//! names (`_amig`, `_ak8k`, ...) churn on every major UI release.

use serde::{Deserialize, Serialize};

/// Named locators for every page element the client touches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Scrollable sidebar pane holding the chat list.
    pub side_pane: String,
    /// The open conversation panel.
    pub chat_panel: String,
    /// Sidebar chat list container.
    pub chat_list: String,
    /// Search results container (replaces the chat list while searching).
    pub search_results: String,
    /// One sidebar entry (chat list or search results).
    pub list_item: String,
    /// Sidebar search input (a Lexical contenteditable, not an `<input>`).
    pub search_input: String,
    /// Contact name in the open panel's header.
    pub panel_header_name: String,

    /// One rendered message row.
    pub message_row: String,
    /// Selectable message body text.
    pub message_body: String,
    /// Structured node carrying the machine-readable
    /// `data-pre-plain-text="[<time>] <sender>:"` attribute.
    pub pre_plain_text: String,
    /// Separately-styled sender span (render path without pre-plain-text).
    pub sender_fallback: String,
    /// Separately-styled time span (render path without pre-plain-text).
    pub time_fallback: String,
    /// Marker present only on outgoing rows.
    pub outgoing_marker: String,

    /// Union of attachment icon nodes flagging a file/media row.
    pub attachment_icons: String,
    /// Download affordance wrapping the attachment name.
    pub attachment_download: String,
    /// Attachment name span inside the download affordance.
    pub attachment_name: String,
    /// Title-attributed span naming the attachment type.
    pub attachment_kind: String,
    /// Title-attributed span carrying a kB/MB size.
    pub attachment_size: String,
    /// Title-attributed span carrying a page count.
    pub attachment_pages: String,

    /// Contact name span inside a sidebar entry.
    pub list_name: String,
    /// Timestamp inside a sidebar entry.
    pub list_time: String,
    /// Last-message preview inside a sidebar entry.
    pub list_preview: String,
    /// Unread-count badge inside a sidebar entry.
    pub unread_badge: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            side_pane: "#pane-side".into(),
            chat_panel: "#main".into(),
            chat_list: r#"div[aria-label="Chat list"]"#.into(),
            search_results: r#"div[aria-label="Search results."]"#.into(),
            list_item: r#"div[role="listitem"]"#.into(),
            search_input:
                "#side div[contenteditable='true'][role='textbox'][data-lexical-editor='true']"
                    .into(),
            panel_header_name: r#"#main header ._amig span[dir="auto"]"#.into(),

            message_row: "#main div[role='row']".into(),
            message_body: "span.selectable-text.copyable-text".into(),
            pre_plain_text: "div._amk6._amlo div.copyable-text".into(),
            sender_fallback: "span._ahxt.x1ypdohk.xt0b8zv._ao3e".into(),
            time_fallback: "span.x1rg5ohu.x16dsc37".into(),
            outgoing_marker: "div.message-out".into(),

            attachment_icons:
                "div.icon-doc-pdf, div.icon-doc-img, div.icon-doc-video, div.icon-audio-download"
                    .into(),
            attachment_download: r#"div[title^="Download"]"#.into(),
            attachment_name: "span.selectable-text".into(),
            attachment_kind: r#"span[title="PDF"], span[title="Image"], span[title="Document"]"#
                .into(),
            attachment_size: r#"span[title*="kB"], span[title*="MB"]"#.into(),
            attachment_pages: r#"span[title*="pages"]"#.into(),

            list_name: r#"span[dir="auto"]"#.into(),
            list_time: "div._ak8i".into(),
            list_preview: "div._ak8k > span > span".into(),
            unread_badge: r#"span[aria-label*="unread"]"#.into(),
        }
    }
}
