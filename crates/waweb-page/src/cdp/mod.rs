//! Chrome DevTools Protocol (CDP) client.
//!
//! Pure Rust CDP client speaking JSON-RPC over WebSocket to an
//! already-running Chrome/Chromium. Start the browser with:
//!
//! ```bash
//! chrome --remote-debugging-port=9222
//! ```
//!
//! and keep a logged-in WhatsApp Web tab open; [`CdpClient::attach_matching`]
//! finds and attaches to it.

mod client;
mod error;
mod session;
mod wire;

pub use client::CdpClient;
pub use error::CdpError;
pub use session::CdpSession;
pub use wire::{DevtoolsEndpoint, PropertyDescriptor, RemoteObject, Target};

pub(crate) use session::js_string;
