use super::*;

#[test]
fn test_command_serializes_without_empty_fields() {
    let cmd = Command {
        id: 7,
        method: "Runtime.evaluate",
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&cmd).unwrap();
    assert!(json.contains("\"id\":7"));
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_command_serializes_session_id_camel_case() {
    let cmd = Command {
        id: 1,
        method: "Runtime.enable",
        params: Some(serde_json::json!({})),
        session_id: Some("sess-1"),
    };
    let json = serde_json::to_string(&cmd).unwrap();
    assert!(json.contains("\"sessionId\":\"sess-1\""));
}

#[test]
fn test_frame_deserialize_reply() {
    let json = r#"{"id":3,"result":{"value":42}}"#;
    let frame: Frame = serde_json::from_str(json).unwrap();
    assert_eq!(frame.id, Some(3));
    assert!(frame.error.is_none());
    assert_eq!(frame.result.unwrap()["value"], 42);
}

#[test]
fn test_frame_deserialize_event() {
    let json = r#"{"method":"Page.loadEventFired","params":{},"sessionId":"s"}"#;
    let frame: Frame = serde_json::from_str(json).unwrap();
    assert!(frame.id.is_none());
    assert_eq!(frame.method.as_deref(), Some("Page.loadEventFired"));
}

#[test]
fn test_frame_deserialize_error_payload() {
    let json = r#"{"id":5,"error":{"code":-32000,"message":"no such object"}}"#;
    let frame: Frame = serde_json::from_str(json).unwrap();
    let err = frame.error.unwrap();
    assert_eq!(err.code, -32000);
    assert_eq!(err.message, "no such object");
}

#[test]
fn test_target_ignores_unused_discovery_fields() {
    let json = r#"{
        "id": "ABC",
        "type": "page",
        "title": "WhatsApp",
        "url": "https://web.whatsapp.com/",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/ABC"
    }"#;
    let target: Target = serde_json::from_str(json).unwrap();
    assert_eq!(target.kind, "page");
    assert!(target.url.starts_with("https://web.whatsapp.com"));
}

#[test]
fn test_devtools_endpoint_deserialize() {
    let json = r#"{
        "Browser": "Chrome/130.0.0.0",
        "Protocol-Version": "1.3",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/xyz"
    }"#;
    let v: DevtoolsEndpoint = serde_json::from_str(json).unwrap();
    assert!(v.browser.starts_with("Chrome"));
    assert!(v.web_socket_debugger_url.starts_with("ws://"));
}

#[test]
fn test_remote_object_null_subtype_is_not_node() {
    let json = r#"{"type":"object","subtype":"null","objectId":"oid"}"#;
    let obj: RemoteObject = serde_json::from_str(json).unwrap();
    assert!(!obj.is_node());
}

#[test]
fn test_remote_object_with_id_is_node() {
    let json = r#"{"type":"object","subtype":"node","objectId":"oid-1","description":"div"}"#;
    let obj: RemoteObject = serde_json::from_str(json).unwrap();
    assert!(obj.is_node());
}

#[test]
fn test_remote_object_without_id_is_not_node() {
    let json = r#"{"type":"undefined"}"#;
    let obj: RemoteObject = serde_json::from_str(json).unwrap();
    assert!(!obj.is_node());
}
