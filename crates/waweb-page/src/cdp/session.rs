//! CDP session attached to a single tab.
//!
//! Element handles are Runtime remote objects rather than DOM-domain node
//! IDs: remote objects survive the app's aggressive virtual-list rerendering
//! better, and every node-scoped read is a `Runtime.callFunctionOn` against
//! the held object.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tracing::debug;

use super::client::Transport;
use super::error::CdpError;
use super::wire::{PropertyDescriptor, RemoteObject};

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Render a Rust string as a JS string literal for interpolation into
/// expressions (selectors routinely contain quotes).
pub(crate) fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Modifier bitmask for `Input.dispatchKeyEvent`.
fn key_modifiers(modifiers: &[&str]) -> i32 {
    let mut flags = 0;
    for m in modifiers {
        match m.to_lowercase().as_str() {
            "alt" => flags |= 1,
            "control" | "ctrl" => flags |= 2,
            "meta" | "command" | "cmd" => flags |= 4,
            "shift" => flags |= 8,
            _ => {}
        }
    }
    flags
}

/// Pull the thrown-exception text out of a Runtime reply, if any.
fn script_exception(reply: &Value) -> Option<CdpError> {
    let details = reply.get("exceptionDetails")?;
    let text = details["text"].as_str().unwrap_or("unknown script error");
    Some(CdpError::JavaScript(text.to_string()))
}

/// A session attached to one tab, issuing session-scoped commands over the
/// shared transport.
pub struct CdpSession {
    target_id: String,
    session_id: String,
    transport: Arc<Transport>,
}

impl CdpSession {
    pub(crate) fn new(target_id: String, session_id: String, transport: Arc<Transport>) -> Self {
        Self {
            target_id,
            session_id,
            transport,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Send a session-scoped CDP command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id))
            .await
    }

    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;
        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigate to `url` and wait for the document to become usable.
    pub async fn navigate(&self, url: &str) -> Result<(), CdpError> {
        let reply = self
            .call("Page.navigate", Some(json!({ "url": url })))
            .await?;
        if let Some(error) = reply.get("errorText").and_then(Value::as_str) {
            return Err(CdpError::NavigationFailed(error.to_string()));
        }

        self.wait_for_load().await?;
        debug!("Navigated to {}", url);
        Ok(())
    }

    /// Poll `document.readyState` until the page is interactive.
    pub async fn wait_for_load(&self) -> Result<(), CdpError> {
        let deadline = tokio::time::Instant::now() + LOAD_TIMEOUT;
        loop {
            let state = self.evaluate("document.readyState").await?;
            if matches!(state.as_str(), Some("complete" | "interactive")) {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(CdpError::Timeout("page load".to_string()));
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    // ========================================================================
    // Script evaluation
    // ========================================================================

    /// Evaluate a JS expression, returning the result by value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let reply = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;
        if let Some(err) = script_exception(&reply) {
            return Err(err);
        }
        Ok(reply["result"]["value"].clone())
    }

    /// Evaluate a JS expression, returning a remote object handle.
    pub async fn evaluate_handle(&self, expression: &str) -> Result<RemoteObject, CdpError> {
        let reply = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": false,
                })),
            )
            .await?;
        if let Some(err) = script_exception(&reply) {
            return Err(err);
        }
        Ok(serde_json::from_value(reply["result"].clone())?)
    }

    /// Apply a JS function to a held remote object, returning by value.
    ///
    /// The object arrives as the function's first argument, `args` follow as
    /// plain values.
    pub async fn apply(
        &self,
        object_id: &str,
        function: &str,
        args: &[Value],
    ) -> Result<Value, CdpError> {
        let reply = self.call_function_on(object_id, function, args, true).await?;
        Ok(reply["result"]["value"].clone())
    }

    /// Apply a JS function to a held remote object, returning a handle.
    pub async fn apply_handle(
        &self,
        object_id: &str,
        function: &str,
        args: &[Value],
    ) -> Result<RemoteObject, CdpError> {
        let reply = self
            .call_function_on(object_id, function, args, false)
            .await?;
        Ok(serde_json::from_value(reply["result"].clone())?)
    }

    async fn call_function_on(
        &self,
        object_id: &str,
        function: &str,
        args: &[Value],
        by_value: bool,
    ) -> Result<Value, CdpError> {
        let mut arguments = vec![json!({ "objectId": object_id })];
        arguments.extend(args.iter().map(|v| json!({ "value": v })));

        // Wrap so the held element arrives as the declared function's first
        // argument.
        let declaration = format!("function(...a) {{ return ({function})(...a); }}");

        let reply = self
            .call(
                "Runtime.callFunctionOn",
                Some(json!({
                    "objectId": object_id,
                    "functionDeclaration": declaration,
                    "arguments": arguments,
                    "returnByValue": by_value,
                    "awaitPromise": true,
                })),
            )
            .await?;
        if let Some(err) = script_exception(&reply) {
            return Err(err);
        }
        Ok(reply)
    }

    /// Collect the element handles of a remote array object, in index order.
    pub async fn array_elements(&self, object_id: &str) -> Result<Vec<RemoteObject>, CdpError> {
        let reply = self
            .call(
                "Runtime.getProperties",
                Some(json!({ "objectId": object_id, "ownProperties": true })),
            )
            .await?;

        let props: Vec<PropertyDescriptor> =
            serde_json::from_value(reply["result"].clone()).unwrap_or_default();

        // Array elements surface as properties with numeric names, plus a
        // `length` property and friends that the parse filters out.
        let mut indexed: Vec<(usize, RemoteObject)> = props
            .into_iter()
            .filter_map(|p| {
                let idx: usize = p.name.parse().ok()?;
                let value = p.value?;
                value.is_node().then_some((idx, value))
            })
            .collect();
        indexed.sort_by_key(|(idx, _)| *idx);

        Ok(indexed.into_iter().map(|(_, obj)| obj).collect())
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Click at page coordinates.
    pub async fn click_at(&self, x: f64, y: f64) -> Result<(), CdpError> {
        for phase in ["mousePressed", "mouseReleased"] {
            self.call(
                "Input.dispatchMouseEvent",
                Some(json!({
                    "type": phase,
                    "x": x,
                    "y": y,
                    "button": "left",
                    "clickCount": 1,
                })),
            )
            .await?;
        }
        debug!("Clicked at ({}, {})", x, y);
        Ok(())
    }

    /// Move the pointer to page coordinates.
    pub async fn mouse_move(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({ "type": "mouseMoved", "x": x, "y": y })),
        )
        .await?;
        Ok(())
    }

    /// Dispatch a scroll-wheel event at the given position.
    pub async fn wheel(&self, x: f64, y: f64, delta_x: f64, delta_y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": "mouseWheel",
                "x": x,
                "y": y,
                "deltaX": delta_x,
                "deltaY": delta_y,
            })),
        )
        .await?;
        Ok(())
    }

    /// Insert text into the focused element.
    pub async fn insert_text(&self, text: &str) -> Result<(), CdpError> {
        self.call("Input.insertText", Some(json!({ "text": text })))
            .await?;
        Ok(())
    }

    /// Press a key, or a `+`-joined combination like `"Control+a"`.
    pub async fn press_key(&self, key: &str) -> Result<(), CdpError> {
        let parts: Vec<&str> = key.split('+').collect();
        let modifiers = key_modifiers(&parts[..parts.len().saturating_sub(1)]);
        let key = parts.last().copied().unwrap_or_default();

        for phase in ["keyDown", "keyUp"] {
            self.call(
                "Input.dispatchKeyEvent",
                Some(json!({ "type": phase, "key": key, "modifiers": modifiers })),
            )
            .await?;
        }
        Ok(())
    }
}
