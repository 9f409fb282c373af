//! CDP message framing and the Runtime/Target payloads the handle reads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing JSON-RPC command. Borrows the method and session id; commands
/// are serialized once and never stored.
#[derive(Debug, Serialize)]
pub(crate) struct Command<'a> {
    pub id: u64,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

/// Incoming frame: either a reply (`id` set) or an unsolicited event
/// (`method` set).
#[derive(Debug, Deserialize)]
pub(crate) struct Frame {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<ProtocolError>,
    pub method: Option<String>,
}

/// Error payload inside a reply frame.
#[derive(Debug, Deserialize)]
pub(crate) struct ProtocolError {
    pub code: i64,
    pub message: String,
}

/// One entry of the `/json/list` discovery endpoint, trimmed to the fields
/// tab matching needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Target {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// The `/json/version` discovery payload. Chrome capitalizes `Browser` but
/// not the socket URL.
#[derive(Debug, Clone, Deserialize)]
pub struct DevtoolsEndpoint {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

/// A Runtime remote object, trimmed to what element handles need.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    pub subtype: Option<String>,
    pub object_id: Option<String>,
}

impl RemoteObject {
    /// Whether this refers to an actual node. A `querySelector` miss comes
    /// back as an object of subtype `null`, which still has no useful id.
    pub fn is_node(&self) -> bool {
        self.object_id.is_some() && self.subtype.as_deref() != Some("null")
    }
}

/// Property descriptor from `Runtime.getProperties`; array elements appear
/// as properties with numeric names.
#[derive(Debug, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub value: Option<RemoteObject>,
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
