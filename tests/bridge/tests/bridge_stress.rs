//! Stress: many requests, pipelining and large bodies.

mod common;

use std::time::Instant;

use serde_json::json;

use toolwire::{ExitReason, ServerConfig};
use toolwire_servers::Worker;

use common::{frame, Host};

#[tokio::test]
async fn test_many_sequential_requests() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());
    host.request(0, "initialize", json!({})).await;

    let start = Instant::now();
    for i in 1..=500 {
        let resp = host.call_tool(i, "echo", json!({"text": format!("msg {i}")})).await;
        assert_eq!(resp["id"], i);
        assert_eq!(resp["result"]["message"], format!("Echo: msg {i}"));
    }
    eprintln!("500 round trips in {:?}", start.elapsed());

    assert_eq!(host.exit().await, ExitReason::Exit);
}

#[tokio::test]
async fn test_pipelined_requests_answered_in_order() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());

    let mut batch = Vec::new();
    for i in 1..=50 {
        let body = json!({
            "jsonrpc": "2.0",
            "id": i,
            "method": "tool/execute",
            "params": {"tool_name": if i % 5 == 0 { "fail" } else { "echo" }, "arguments": {"text": i.to_string()}}
        });
        batch.extend(frame(&body.to_string()));
    }
    host.send_raw(&batch).await;

    for i in 1..=50 {
        let resp = host.read_response().await;
        assert_eq!(resp["id"], i);
        if i % 5 == 0 {
            assert_eq!(resp["error"]["code"], -32000);
        } else {
            assert_eq!(resp["result"]["message"], format!("Echo: {i}"));
        }
    }
}

#[tokio::test]
async fn test_large_body() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());
    let text = "x".repeat(1024 * 1024);

    let resp = host.call_tool(1, "echo", json!({"text": text})).await;
    let message = resp["result"]["message"].as_str().unwrap();
    assert_eq!(message.len(), "Echo: ".len() + 1024 * 1024);
}

#[tokio::test]
async fn test_multibyte_body_lengths() {
    let mut host = Host::spawn(Worker::Echo, &ServerConfig::default());
    let text = "żółć 🦀 ".repeat(1000);

    let resp = host.call_tool(1, "echo", json!({"text": text})).await;
    assert_eq!(resp["result"]["message"], format!("Echo: {text}"));
}

#[tokio::test]
async fn test_oversized_header_then_normal_traffic() {
    let mut config = ServerConfig::default();
    config.max_header_bytes = 256;
    let mut host = Host::spawn(Worker::Echo, &config);

    let padding = "a".repeat(1024);
    host.send_raw(format!("X-Padding: {padding}\r\n\r\n").as_bytes())
        .await;
    // Give the worker a chance to reject the header before the next frame
    // lands in the same buffer.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let resp = host.request(1, "initialize", json!({})).await;
    assert_eq!(resp["id"], 1);
}
