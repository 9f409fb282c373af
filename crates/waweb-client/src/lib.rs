//! DOM-scraping client for the web messaging UI.
//!
//! The crate turns a live page session into structured data: normalized
//! message rows, attachment metadata, ordered conversation summaries, and
//! a change-detection watcher. Everything is generic over the
//! [`PageHandle`] capability from `waweb-page`, so the whole core is
//! testable against an in-memory page simulator.
//!
//! [`PageHandle`]: waweb_page::PageHandle

pub mod attachment;
pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod navigate;
pub mod row;
pub mod scroll;
pub mod selectors;
pub mod sidebar;
pub mod transform;
pub mod watch;

pub use client::Client;
pub use config::ClientConfig;
pub use error::ClientError;
pub use model::{
    Attachment, AttachmentKind, ConversationSummary, FlatEntry, Message, Sender,
    SENDER_PLACEHOLDER,
};
pub use selectors::Selectors;
pub use watch::WatchHandle;
