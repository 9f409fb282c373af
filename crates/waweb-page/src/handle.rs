//! Page handle capability traits.
//!
//! The scraping core never talks to a browser directly; it is handed a
//! [`PageHandle`] and works purely in terms of selectors, node reads, and
//! simulated input. Anything that can answer these queries (a live CDP
//! session, an in-memory fake in tests) can drive the core.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by a page handle implementation.
#[derive(Debug, Error)]
pub enum PageError {
    /// A bounded wait elapsed without the condition being met.
    #[error("timed out: {0}")]
    Timeout(String),

    /// The node is gone from the live page.
    #[error("node is no longer attached")]
    Detached,

    /// In-page script evaluation failed.
    #[error("script error: {0}")]
    Script(String),

    /// Transport or protocol failure in the backing implementation.
    #[error("page backend error: {0}")]
    Backend(String),
}

/// Axis-aligned layout box of a rendered element, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Center point of the box.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A handle onto one element of the live page.
///
/// Node handles are snapshots of identity, not of content: every read goes
/// back to the page, and a node may detach at any time as the page rerenders.
#[async_trait]
pub trait PageNode: Sized + Send + Sync {
    /// First descendant matching `selector`, if any.
    async fn query_selector(&self, selector: &str) -> Result<Option<Self>, PageError>;

    /// All descendants matching `selector`, in DOM order.
    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Self>, PageError>;

    /// Rendered text of the node.
    async fn inner_text(&self) -> Result<String, PageError>;

    /// Attribute value, `None` when the attribute is absent.
    async fn attribute(&self, name: &str) -> Result<Option<String>, PageError>;

    /// Apply a single-argument JS function (e.g. `"el => el.scrollHeight"`)
    /// to this node in page context and return the result by value.
    async fn evaluate(&self, function: &str) -> Result<Value, PageError>;

    /// Layout box, `None` when the node has no layout (hidden, detached).
    async fn bounding_box(&self) -> Result<Option<BoundingBox>, PageError>;

    /// Click the center of the node.
    async fn click(&self) -> Result<(), PageError>;
}

/// Capability handle onto one live browser page.
#[async_trait]
pub trait PageHandle: Send + Sync {
    type Node: PageNode;

    /// First element matching `selector`, if any.
    async fn query_selector(&self, selector: &str) -> Result<Option<Self::Node>, PageError>;

    /// All elements matching `selector`, in DOM order.
    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Node>, PageError>;

    /// Poll for `selector` until it appears or `timeout` elapses.
    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Self::Node, PageError>;

    /// Evaluate a JS expression in page context, returning the result by value.
    async fn evaluate(&self, expression: &str) -> Result<Value, PageError>;

    /// Navigate the page to `url` and wait for it to load.
    async fn goto(&self, url: &str) -> Result<(), PageError>;

    /// Type text into the focused element, pausing `key_delay` between keys.
    async fn type_text(&self, text: &str, key_delay: Duration) -> Result<(), PageError>;

    /// Press a key or a `+`-joined combination (e.g. `"Control+a"`).
    async fn press_key(&self, key: &str) -> Result<(), PageError>;

    /// Move the pointer to page coordinates.
    async fn move_mouse(&self, x: f64, y: f64) -> Result<(), PageError>;

    /// Dispatch a scroll-wheel event at the current pointer position.
    async fn wheel(&self, delta_x: f64, delta_y: f64) -> Result<(), PageError>;
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
