//! Canonical records recovered from the rendered page.
//!
//! Everything here is transient: records are rebuilt on every extraction
//! call and carry no cross-call identity. Callers diff by value.

use serde::{Deserialize, Serialize};

/// Placeholder used when a row exposes no structural sender clue.
pub const SENDER_PLACEHOLDER: &str = "Sender";

/// Who sent a message, as far as the markup reveals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    /// The logged-in user. Outgoing rows never expose the user's own name,
    /// only a direction marker.
    You,
    /// A named counterparty.
    Contact(String),
    /// No structural clue found yet. Normalized to
    /// [`SENDER_PLACEHOLDER`] before a `Message` leaves the parser.
    Unknown,
}

impl Sender {
    /// Display name for the sender.
    pub fn name(&self) -> &str {
        match self {
            Sender::You => "You",
            Sender::Contact(name) => name,
            Sender::Unknown => SENDER_PLACEHOLDER,
        }
    }

    /// Replace `Unknown` with the fixed placeholder contact.
    pub(crate) fn normalized(self) -> Sender {
        match self {
            Sender::Unknown => Sender::Contact(SENDER_PLACEHOLDER.to_string()),
            other => other,
        }
    }
}

/// One message recovered from a conversation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    /// Timestamp exactly as rendered; the page exposes no machine time.
    pub timestamp_text: String,
    pub body: String,
    pub attachment: Option<Attachment>,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            sender: Sender::Unknown,
            timestamp_text: String::new(),
            body: String::new(),
            attachment: None,
        }
    }
}

/// Recognized attachment categories (from the type hint's title attribute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentKind {
    Pdf,
    Image,
    Document,
    Unrecognized,
}

impl AttachmentKind {
    /// Map a type-hint title to a kind.
    pub fn from_title(title: &str) -> AttachmentKind {
        match title {
            "PDF" => AttachmentKind::Pdf,
            "Image" => AttachmentKind::Image,
            "Document" => AttachmentKind::Document,
            _ => AttachmentKind::Unrecognized,
        }
    }
}

/// Attachment metadata. Every field is best-effort: a missing sub-element
/// leaves the field unresolved, it is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: Option<String>,
    pub kind: AttachmentKind,
    /// Size exactly as rendered (e.g. "2 MB").
    pub size_text: Option<String>,
    /// Auxiliary hint, e.g. a page count.
    pub extra_text: Option<String>,
}

/// One sidebar conversation entry, in its rendered state.
///
/// Equality covers the watched content fields only: `order_key` positions
/// the entry but an offset shift alone is not a content change, so it must
/// not trip value-diffing consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub contact_name: String,
    pub preview_text: String,
    pub timestamp_text: String,
    pub unread_count: u32,
    /// Vertical transform offset of the entry. The sidebar is a virtualized
    /// list positioned by CSS transforms, so DOM order is meaningless; this
    /// offset is the only reliable display-order signal. Smallest = topmost
    /// = most recently active. Ordering only; excluded from equality.
    pub order_key: f64,
}

impl PartialEq for ConversationSummary {
    fn eq(&self, other: &Self) -> bool {
        self.contact_name == other.contact_name
            && self.preview_text == other.preview_text
            && self.timestamp_text == other.timestamp_text
            && self.unread_count == other.unread_count
    }
}

/// A sidebar entry decoded from its flat newline-joined text, for render
/// paths where the structured sub-nodes are unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatEntry {
    /// Chat (contact or group) name.
    pub sender: String,
    pub time: String,
    pub message: String,
    pub unread: bool,
    pub no_of_unread: u32,
    pub group: bool,
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
