//! Full host/worker sessions over an in-memory pipe.
//!
//! Each test spawns a real worker loop and talks to it the way a host
//! process does: framed requests in, framed responses out.

mod common;

use serde_json::json;

use toolwire::{ExitReason, ServerConfig};
use toolwire_servers::Worker;

use common::{frame, tool_names, Host};

#[tokio::test]
async fn test_echo_worker_lifecycle() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());

    let init = host
        .request(1, "initialize", json!({"clientInfo": {"name": "bridge", "version": "1.0"}}))
        .await;
    assert_eq!(init["id"], 1);
    assert_eq!(init["result"]["serverInfo"]["name"], "echo-mcp");
    assert_eq!(init["result"]["status"], "initialized");
    assert_eq!(tool_names(&init), vec!["echo", "fail"]);

    let echoed = host.call_tool(2, "echo", json!({"text": "ping"})).await;
    assert_eq!(
        echoed,
        json!({"jsonrpc": "2.0", "id": 2, "result": {"message": "Echo: ping"}})
    );

    let failed = host.call_tool(3, "fail", json!({})).await;
    assert_eq!(failed["error"]["code"], -32000);
    assert_eq!(
        failed["error"]["message"],
        "Tool execution error: This tool failed intentionally!"
    );

    let missing = host.call_tool(4, "nope", json!({})).await;
    assert_eq!(missing["error"]["code"], -32601);
    assert_eq!(missing["error"]["message"], "Tool not found: nope");

    let shutdown = host.request(5, "shutdown", json!(null)).await;
    assert_eq!(shutdown, json!({"jsonrpc": "2.0", "id": 5, "result": null}));

    assert_eq!(host.exit().await, ExitReason::Exit);
}

#[tokio::test]
async fn test_hang_up_ends_worker() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());
    host.request(1, "initialize", json!({})).await;
    assert_eq!(host.hang_up().await, ExitReason::EndOfStream);
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());
    host.notify("initialized").await;
    host.notify("$/progress").await;
    host.send(&json!({"jsonrpc": "2.0", "method": "tool/execute", "params": {"tool_name": "echo"}}))
        .await;

    // The first response on the wire answers the first request.
    let init = host.request(7, "initialize", json!({})).await;
    assert_eq!(init["id"], 7);
}

#[tokio::test]
async fn test_alias_method_and_legacy_name_field() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());
    let resp = host
        .request(
            1,
            "mcp/tool/execute",
            json!({"name": "echo", "arguments": {"text": "legacy"}}),
        )
        .await;
    assert_eq!(resp["result"]["message"], "Echo: legacy");
}

#[tokio::test]
async fn test_string_ids_round_trip() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());
    host.send(&json!({"jsonrpc": "2.0", "id": "abc-1", "method": "initialize"}))
        .await;
    let resp = host.read_response().await;
    assert_eq!(resp["id"], "abc-1");
}

#[tokio::test]
async fn test_invalid_arguments_shape() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());
    let resp = host.call_tool(1, "echo", json!("not an object")).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn test_garbage_between_frames_is_survivable() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());
    host.send_raw(&frame("{broken")).await;
    host.send_raw(b"Content-Type: nothing\r\n\r\n").await;
    host.send_raw(&frame(r#"{"jsonrpc":"2.0","id":1}"#)).await;

    let resp = host.call_tool(2, "echo", json!({"text": "still alive"})).await;
    assert_eq!(resp["id"], 2);
    assert_eq!(resp["result"]["message"], "Echo: still alive");
}

#[tokio::test]
async fn test_lf_only_header_from_host() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());
    let body = r#"{"jsonrpc":"2.0","id":9,"method":"initialize"}"#;
    host.send_raw(format!("Content-Length: {}\n\n{}", body.len(), body).as_bytes())
        .await;
    assert_eq!(host.read_response().await["id"], 9);
}

#[tokio::test]
async fn test_byte_by_byte_delivery() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());
    let body = r#"{"jsonrpc":"2.0","id":3,"method":"tool/execute","params":{"tool_name":"echo","arguments":{"text":"slow"}}}"#;
    host.send_trickle(&frame(body)).await;
    let resp = host.read_response().await;
    assert_eq!(resp["result"]["message"], "Echo: slow");
}

#[tokio::test]
async fn test_nothing_written_after_exit() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());
    let mut bytes = frame(r#"{"jsonrpc":"2.0","method":"exit"}"#);
    bytes.extend(frame(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#));
    host.send_raw(&bytes).await;
    assert!(host.drain().await.is_empty());
}

#[tokio::test]
async fn test_memory_store_handshake_only() {
    let mut host = Host::spawn(Worker::MemoryStore, &ServerConfig::default());

    let init = host.request(1, "initialize", json!({})).await;
    assert_eq!(init["result"]["serverInfo"]["name"], "memory-store-mcp");
    assert!(tool_names(&init).is_empty());

    let missing = host.call_tool(2, "memory_add", json!({})).await;
    assert_eq!(missing["error"]["code"], -32601);

    let shutdown = host.request(3, "shutdown", json!(null)).await;
    assert_eq!(shutdown["result"], serde_json::Value::Null);
    assert_eq!(host.exit().await, ExitReason::Exit);
}
