//! CDP error taxonomy.

use thiserror::Error;

/// Errors from the CDP transport and the commands issued over it.
#[derive(Debug, Error)]
pub enum CdpError {
    /// The debugging endpoint did not answer discovery.
    #[error(
        "browser not reachable at {0}; start Chrome with --remote-debugging-port=9222"
    )]
    BrowserUnreachable(String),

    /// WebSocket transport failure.
    #[error("websocket failure: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// HTTP failure talking to the discovery endpoints.
    #[error("endpoint discovery failed: {0}")]
    Discovery(#[from] reqwest::Error),

    /// The browser answered a command with an error payload.
    #[error("protocol error {code}: {message}")]
    Protocol { code: i64, message: String },

    /// A frame or payload did not decode.
    #[error("malformed protocol payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// No open page tab matched the requested URL prefix.
    #[error("no open tab matching {0}")]
    TabNotFound(String),

    /// `Page.navigate` reported a failure.
    #[error("navigation failed: {0}")]
    NavigationFailed(String),

    /// In-page script threw.
    #[error("script threw: {0}")]
    JavaScript(String),

    /// A command or wait exceeded its deadline.
    #[error("timed out: {0}")]
    Timeout(String),

    /// The connection went away while a command was in flight.
    #[error("session closed")]
    SessionClosed,

    /// A reply was syntactically valid JSON but missing expected fields.
    #[error("unexpected reply shape: {0}")]
    InvalidResponse(String),
}
