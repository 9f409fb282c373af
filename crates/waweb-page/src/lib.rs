//! Page handle capability for waweb.
//!
//! The scraping core in `waweb-client` is written against the [`PageHandle`]
//! and [`PageNode`] traits; this crate defines them and ships the production
//! implementation, [`CdpPage`], which drives a tab of an already-running
//! Chrome over the DevTools Protocol.
//!
//! ```text
//! ┌──────────────┐   PageHandle    ┌───────────┐    WebSocket    ┌─────────┐
//! │ waweb-client │ ◄─────────────► │  CdpPage  │ ◄─────────────► │ Chrome  │
//! └──────────────┘                 └───────────┘       CDP       └─────────┘
//! ```
//!
//! Browser lifecycle (launching, profiles, login) is deliberately outside
//! this crate: it attaches to an existing tab and never navigates away from
//! the app except where the client asks it to.

mod handle;
pub mod cdp;
mod page;

pub use cdp::{CdpClient, CdpError, CdpSession};
pub use handle::{BoundingBox, PageError, PageHandle, PageNode};
pub use page::{CdpNode, CdpPage};
