//! [`PageHandle`] implementation over a CDP session.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use crate::cdp::{CdpClient, CdpError, CdpSession, RemoteObject, js_string};
use crate::handle::{BoundingBox, PageError, PageHandle, PageNode};

impl From<CdpError> for PageError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::Timeout(msg) => PageError::Timeout(msg),
            CdpError::JavaScript(msg) => PageError::Script(msg),
            CdpError::SessionClosed => PageError::Detached,
            other => PageError::Backend(other.to_string()),
        }
    }
}

/// A live browser page driven over CDP.
///
/// Holds the client alive for the lifetime of the handle; dropping the page
/// tears down the WebSocket receive task.
pub struct CdpPage {
    _client: Arc<CdpClient>,
    session: Arc<CdpSession>,
    /// Last pointer position, for wheel dispatch.
    mouse_pos: Mutex<(f64, f64)>,
}

impl CdpPage {
    /// Connect to `endpoint` and attach to the first tab whose URL starts
    /// with `url_prefix`.
    pub async fn attach(endpoint: &str, url_prefix: &str) -> Result<Self, CdpError> {
        let client = CdpClient::connect(endpoint).await?;
        let session = client.attach_matching(url_prefix).await?;
        debug!("Attached page handle to target {}", session.target_id());
        Ok(Self {
            _client: Arc::new(client),
            session: Arc::new(session),
            mouse_pos: Mutex::new((0.0, 0.0)),
        })
    }

    fn node(&self, obj: RemoteObject) -> Option<CdpNode> {
        let object_id = obj.is_node().then_some(obj.object_id)??;
        Some(CdpNode {
            session: self.session.clone(),
            object_id,
        })
    }
}

/// An element handle backed by a Runtime remote object.
#[derive(Clone)]
pub struct CdpNode {
    session: Arc<CdpSession>,
    object_id: String,
}

impl CdpNode {
    fn child(&self, obj: RemoteObject) -> Option<CdpNode> {
        let object_id = obj.is_node().then_some(obj.object_id)??;
        Some(CdpNode {
            session: self.session.clone(),
            object_id,
        })
    }
}

#[async_trait]
impl PageNode for CdpNode {
    async fn query_selector(&self, selector: &str) -> Result<Option<Self>, PageError> {
        let obj = self
            .session
            .apply_handle(
                &self.object_id,
                "(el, sel) => el.querySelector(sel)",
                &[Value::String(selector.to_string())],
            )
            .await?;
        Ok(self.child(obj))
    }

    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Self>, PageError> {
        let array = self
            .session
            .apply_handle(
                &self.object_id,
                "(el, sel) => Array.from(el.querySelectorAll(sel))",
                &[Value::String(selector.to_string())],
            )
            .await?;
        let Some(array_id) = array.object_id else {
            return Ok(Vec::new());
        };
        let elements = self.session.array_elements(&array_id).await?;
        Ok(elements.into_iter().filter_map(|o| self.child(o)).collect())
    }

    async fn inner_text(&self) -> Result<String, PageError> {
        let value = self
            .session
            .apply(&self.object_id, "el => el.innerText", &[])
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, PageError> {
        let value = self
            .session
            .apply(
                &self.object_id,
                "(el, name) => el.getAttribute(name)",
                &[Value::String(name.to_string())],
            )
            .await?;
        Ok(value.as_str().map(|s| s.to_string()))
    }

    async fn evaluate(&self, function: &str) -> Result<Value, PageError> {
        Ok(self.session.apply(&self.object_id, function, &[]).await?)
    }

    async fn bounding_box(&self) -> Result<Option<BoundingBox>, PageError> {
        let value = self
            .session
            .apply(
                &self.object_id,
                "el => { const r = el.getBoundingClientRect(); \
                 return { x: r.x, y: r.y, width: r.width, height: r.height }; }",
                &[],
            )
            .await?;
        let bbox: Option<BoundingBox> = serde_json::from_value(value)
            .map_err(|e| PageError::Backend(format!("bad bounding box: {}", e)))?;
        // Zero-sized boxes mean the element is not actually rendered.
        Ok(bbox.filter(|b| b.width > 0.0 && b.height > 0.0))
    }

    async fn click(&self) -> Result<(), PageError> {
        let bbox = self
            .bounding_box()
            .await?
            .ok_or_else(|| PageError::Backend("element has no layout".to_string()))?;
        let (x, y) = bbox.center();
        self.session.click_at(x, y).await?;
        Ok(())
    }
}

#[async_trait]
impl PageHandle for CdpPage {
    type Node = CdpNode;

    async fn query_selector(&self, selector: &str) -> Result<Option<Self::Node>, PageError> {
        let obj = self
            .session
            .evaluate_handle(&format!("document.querySelector({})", js_string(selector)))
            .await?;
        Ok(self.node(obj))
    }

    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Node>, PageError> {
        let array = self
            .session
            .evaluate_handle(&format!(
                "Array.from(document.querySelectorAll({}))",
                js_string(selector)
            ))
            .await?;
        let Some(array_id) = array.object_id else {
            return Ok(Vec::new());
        };
        let elements = self.session.array_elements(&array_id).await?;
        Ok(elements.into_iter().filter_map(|o| self.node(o)).collect())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Self::Node, PageError> {
        let start = tokio::time::Instant::now();

        loop {
            if let Some(node) = self.query_selector(selector).await? {
                return Ok(node);
            }

            if start.elapsed() > timeout {
                return Err(PageError::Timeout(format!(
                    "Waiting for selector '{}' timed out",
                    selector
                )));
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    async fn evaluate(&self, expression: &str) -> Result<Value, PageError> {
        Ok(self.session.evaluate(expression).await?)
    }

    async fn goto(&self, url: &str) -> Result<(), PageError> {
        Ok(self.session.navigate(url).await?)
    }

    async fn type_text(&self, text: &str, key_delay: Duration) -> Result<(), PageError> {
        if key_delay.is_zero() {
            self.session.insert_text(text).await?;
            return Ok(());
        }
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            self.session.insert_text(ch.encode_utf8(&mut buf)).await?;
            tokio::time::sleep(key_delay).await;
        }
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<(), PageError> {
        Ok(self.session.press_key(key).await?)
    }

    async fn move_mouse(&self, x: f64, y: f64) -> Result<(), PageError> {
        self.session.mouse_move(x, y).await?;
        *self.mouse_pos.lock() = (x, y);
        Ok(())
    }

    async fn wheel(&self, delta_x: f64, delta_y: f64) -> Result<(), PageError> {
        let (x, y) = *self.mouse_pos.lock();
        Ok(self.session.wheel(x, y, delta_x, delta_y).await?)
    }
}
