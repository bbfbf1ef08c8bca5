//! Shared builders for engine tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::{json, Map, Value};

use toolwire::tools::FnTool;
use toolwire::types::{JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, ServerIdentity, ToolDescriptor};
use toolwire::{ProtocolHandler, ToolError, ToolRegistry};

/// Frame a body the way a well-behaved host does.
pub fn frame(body: &str) -> Vec<u8> {
    format!("Content-Length: {}\r\n\r\n{}", body.len(), body).into_bytes()
}

/// Frame several bodies back to back.
pub fn frames(bodies: &[String]) -> Vec<u8> {
    bodies.iter().flat_map(|body| frame(body)).collect()
}

/// Serialized request body.
pub fn request_body(id: i64, method: &str, params: Value) -> String {
    json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}).to_string()
}

/// Serialized notification body.
pub fn notification_body(method: &str) -> String {
    json!({"jsonrpc": "2.0", "method": method}).to_string()
}

pub fn request(id: i64, method: &str, params: Value) -> JsonRpcMessage {
    JsonRpcMessage::Request(JsonRpcRequest::new(id, method, Some(params)))
}

pub fn notification(method: &str) -> JsonRpcMessage {
    JsonRpcMessage::Notification(JsonRpcNotification::new(method, None))
}

/// Registry with `echo`, `add`, `boom` and `panic` tools.
pub fn test_registry() -> ToolRegistry {
    test_registry_counting(Arc::new(AtomicUsize::new(0)))
}

/// Like [`test_registry`]; `calls` counts every handler invocation.
pub fn test_registry_counting(calls: Arc<AtomicUsize>) -> ToolRegistry {
    let echo_calls = Arc::clone(&calls);
    let add_calls = Arc::clone(&calls);
    let boom_calls = Arc::clone(&calls);
    let panic_calls = calls;

    ToolRegistry::builder()
        .register(
            ToolDescriptor::new("echo", "Returns its arguments"),
            FnTool(move |args: Map<String, Value>| {
                echo_calls.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Object(args))
            }),
        )
        .unwrap()
        .register(
            ToolDescriptor::new("add", "Adds a and b").with_schema(json!({"type": "object"})),
            FnTool(move |args: Map<String, Value>| {
                add_calls.fetch_add(1, Ordering::SeqCst);
                let a = args.get("a").and_then(Value::as_i64).unwrap_or(0);
                let b = args.get("b").and_then(Value::as_i64).unwrap_or(0);
                Ok(json!({"sum": a + b}))
            }),
        )
        .unwrap()
        .register(
            ToolDescriptor::new("boom", "Always fails"),
            FnTool(move |_args: Map<String, Value>| {
                boom_calls.fetch_add(1, Ordering::SeqCst);
                Err(ToolError::failed("boom"))
            }),
        )
        .unwrap()
        .register(
            ToolDescriptor::new("panic", "Panics"),
            FnTool(move |_args: Map<String, Value>| -> Result<Value, ToolError> {
                panic_calls.fetch_add(1, Ordering::SeqCst);
                panic!("handler panicked")
            }),
        )
        .unwrap()
        .build()
}

pub fn test_identity() -> ServerIdentity {
    ServerIdentity::new("test-mcp", "0.1.0")
}

pub fn test_handler() -> ProtocolHandler {
    ProtocolHandler::new(test_identity(), test_registry())
}

/// Split framed output back into JSON values.
pub fn parse_frames(mut bytes: &[u8]) -> Vec<Value> {
    let mut out = Vec::new();
    while !bytes.is_empty() {
        let text = std::str::from_utf8(bytes).expect("output is UTF-8");
        let rest = text
            .strip_prefix("Content-Length: ")
            .expect("frame starts with Content-Length");
        let header_end = rest.find("\r\n\r\n").expect("header terminator");
        let len: usize = rest[..header_end].parse().expect("numeric length");
        let body_start = "Content-Length: ".len() + header_end + 4;
        let body = &bytes[body_start..body_start + len];
        out.push(serde_json::from_slice(body).expect("body is JSON"));
        bytes = &bytes[body_start + len..];
    }
    out
}

/// Response as JSON, for asserting on the wire shape.
pub fn to_json(response: &toolwire::types::Response) -> Value {
    serde_json::to_value(response).expect("response serializes")
}
