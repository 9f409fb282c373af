//! CDP WebSocket client and command transport.
//!
//! Connects to an already-running browser over its debugging endpoint and
//! attaches to the tab showing the messaging web app. This crate never
//! launches a browser or manages login state; it assumes the user has a
//! logged-in tab open.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::session::CdpSession;
use super::wire::{Command, DevtoolsEndpoint, Frame, Target};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

const CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Routes reply frames back to the callers waiting on them.
#[derive(Default)]
struct Router {
    pending: Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>,
}

impl Router {
    fn register(&self, id: u64) -> oneshot::Receiver<Result<Value, CdpError>> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);
        rx
    }

    fn forget(&self, id: u64) {
        self.pending.lock().remove(&id);
    }

    fn complete(&self, frame: Frame) {
        let Some(id) = frame.id else {
            // Unsolicited event; the handle drives everything by polling
            // and has no use for the event stream.
            if let Some(method) = frame.method {
                trace!("cdp event ignored: {}", method);
            }
            return;
        };
        let Some(tx) = self.pending.lock().remove(&id) else {
            return;
        };
        let result = match frame.error {
            Some(err) => Err(CdpError::Protocol {
                code: err.code,
                message: err.message,
            }),
            None => Ok(frame.result.unwrap_or(Value::Null)),
        };
        let _ = tx.send(result);
    }

    fn fail_all(&self) {
        for (_, tx) in self.pending.lock().drain() {
            let _ = tx.send(Err(CdpError::SessionClosed));
        }
    }
}

/// Shared command plumbing: serializes commands onto the socket and waits
/// for the matching reply. One transport serves the browser-level client
/// and every attached session.
pub(crate) struct Transport {
    sink: tokio::sync::Mutex<WsSink>,
    router: Arc<Router>,
    next_id: AtomicU64,
}

impl Transport {
    fn new(sink: WsSink, router: Arc<Router>) -> Self {
        Self {
            sink: tokio::sync::Mutex::new(sink),
            router,
            next_id: AtomicU64::new(1),
        }
    }

    /// Issue one command and wait for its reply.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let text = serde_json::to_string(&Command {
            id,
            method,
            params,
            session_id,
        })?;
        trace!("cdp send: {}", text);

        let rx = self.router.register(id);

        {
            let mut sink = self.sink.lock().await;
            sink.send(Message::Text(text.into())).await?;
        }

        match tokio::time::timeout(CALL_TIMEOUT, rx).await {
            Ok(Ok(result)) => result,
            // Sender dropped: the receive loop ended under us.
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.router.forget(id);
                Err(CdpError::Timeout(format!("no reply to {method}")))
            }
        }
    }
}

/// CDP client attached to a running browser.
pub struct CdpClient {
    http_endpoint: String,
    transport: Arc<Transport>,
    router: Arc<Router>,
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to a browser at the given debugging endpoint
    /// (e.g. `http://localhost:9222`).
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();

        let version_url = format!("{http_endpoint}/json/version");
        let version: DevtoolsEndpoint = reqwest::get(&version_url)
            .await
            .map_err(|e| CdpError::BrowserUnreachable(format!("{endpoint}: {e}")))?
            .json()
            .await
            .map_err(|e| CdpError::BrowserUnreachable(format!("{endpoint}: {e}")))?;
        debug!("Connected to {}", version.browser);

        let (ws_stream, _) =
            tokio_tungstenite::connect_async(&version.web_socket_debugger_url).await?;
        let (sink, source) = ws_stream.split();

        let router = Arc::new(Router::default());
        let transport = Arc::new(Transport::new(sink, Arc::clone(&router)));
        let recv_task = tokio::spawn(receive_loop(source, Arc::clone(&router)));

        Ok(Self {
            http_endpoint,
            transport,
            router,
            recv_task,
        })
    }

    /// List all open targets via the discovery endpoint.
    pub async fn list_targets(&self) -> Result<Vec<Target>, CdpError> {
        let url = format!("{}/json/list", self.http_endpoint);
        Ok(reqwest::get(&url).await?.json().await?)
    }

    /// Attach to the first open page tab whose URL starts with `url_prefix`.
    pub async fn attach_matching(&self, url_prefix: &str) -> Result<CdpSession, CdpError> {
        let target = self
            .list_targets()
            .await?
            .into_iter()
            .find(|t| t.kind == "page" && t.url.starts_with(url_prefix))
            .ok_or_else(|| CdpError::TabNotFound(url_prefix.to_string()))?;

        debug!("Attaching to tab {} ({})", target.id, target.url);
        self.attach(&target.id).await
    }

    /// Attach to a target by id, yielding a session scoped to that tab.
    pub async fn attach(&self, target_id: &str) -> Result<CdpSession, CdpError> {
        let reply = self
            .transport
            .call(
                "Target.attachToTarget",
                Some(json!({ "targetId": target_id, "flatten": true })),
                None,
            )
            .await?;

        let session_id = reply["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("attach reply without sessionId".into()))?
            .to_string();

        let session = CdpSession::new(
            target_id.to_string(),
            session_id,
            Arc::clone(&self.transport),
        );
        session.enable_domains().await?;
        Ok(session)
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
        self.router.fail_all();
    }
}

/// Drain the socket, completing pending calls; events are dropped.
async fn receive_loop(mut source: WsSource, router: Arc<Router>) {
    while let Some(msg) = source.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                trace!("cdp recv: {}", text);
                match serde_json::from_str::<Frame>(&text) {
                    Ok(frame) => router.complete(frame),
                    Err(e) => warn!("Undecodable CDP frame: {}", e),
                }
            }
            Ok(Message::Close(_)) => {
                debug!("WebSocket closed by browser");
                break;
            }
            Err(e) => {
                error!("WebSocket receive error: {}", e);
                break;
            }
            _ => {}
        }
    }
    router.fail_all();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_completes_matching_reply() {
        let router = Router::default();
        let mut rx = router.register(9);
        router.complete(Frame {
            id: Some(9),
            result: Some(json!({"ok": true})),
            error: None,
            method: None,
        });
        let value = rx.try_recv().unwrap().unwrap();
        assert_eq!(value["ok"], true);
        assert!(router.pending.lock().is_empty());
    }

    #[test]
    fn test_router_maps_error_payload() {
        let router = Router::default();
        let mut rx = router.register(4);
        router.complete(Frame {
            id: Some(4),
            result: None,
            error: Some(super::super::wire::ProtocolError {
                code: -32000,
                message: "no such object".to_string(),
            }),
            method: None,
        });
        let err = rx.try_recv().unwrap().unwrap_err();
        assert!(matches!(err, CdpError::Protocol { code: -32000, .. }));
    }

    #[test]
    fn test_router_ignores_events_and_unknown_ids() {
        let router = Router::default();
        router.complete(Frame {
            id: None,
            result: None,
            error: None,
            method: Some("Page.loadEventFired".to_string()),
        });
        router.complete(Frame {
            id: Some(77),
            result: Some(Value::Null),
            error: None,
            method: None,
        });
        assert!(router.pending.lock().is_empty());
    }

    #[test]
    fn test_fail_all_drains_pending() {
        let router = Router::default();
        let mut rx = router.register(1);
        router.fail_all();
        assert!(matches!(rx.try_recv(), Ok(Err(CdpError::SessionClosed))));
        assert!(router.pending.lock().is_empty());
    }
}
