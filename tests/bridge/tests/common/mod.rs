//! A fake host driving a worker over an in-memory duplex pipe.

#![allow(dead_code)]

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::task::JoinHandle;

use toolwire::{ExitReason, ServerConfig, ShutdownFlag, StdioTransport};
use toolwire_servers::Worker;

const PIPE_CAPACITY: usize = 64 * 1024;

pub struct Host {
    stream: DuplexStream,
    worker: JoinHandle<ExitReason>,
}

impl Host {
    /// Start `worker` on its own task and connect to it.
    pub fn spawn(worker: Worker, config: &ServerConfig) -> Self {
        let (host_side, worker_side) = tokio::io::duplex(PIPE_CAPACITY);
        let handler = worker.build_handler(config).expect("registry builds");
        let max_header_bytes = config.max_header_bytes;

        let worker = tokio::spawn(async move {
            let (reader, writer) = tokio::io::split(worker_side);
            let mut transport =
                StdioTransport::with_streams(reader, writer, handler, ShutdownFlag::new())
                    .with_max_header_bytes(max_header_bytes);
            transport.run().await
        });

        Self {
            stream: host_side,
            worker,
        }
    }

    /// Write raw bytes to the worker.
    pub async fn send_raw(&mut self, bytes: &[u8]) {
        self.stream.write_all(bytes).await.expect("worker is reading");
    }

    /// Write raw bytes one at a time.
    pub async fn send_trickle(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.stream.write_all(&[*byte]).await.expect("worker is reading");
            tokio::task::yield_now().await;
        }
    }

    /// Frame and send a JSON body.
    pub async fn send(&mut self, body: &Value) {
        self.send_raw(&frame(&body.to_string())).await;
    }

    pub async fn request(&mut self, id: i64, method: &str, params: Value) -> Value {
        self.send(&json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))
            .await;
        self.read_response().await
    }

    pub async fn notify(&mut self, method: &str) {
        self.send(&json!({"jsonrpc": "2.0", "method": method})).await;
    }

    pub async fn call_tool(&mut self, id: i64, tool: &str, arguments: Value) -> Value {
        self.request(
            id,
            "tool/execute",
            json!({"tool_name": tool, "arguments": arguments}),
        )
        .await
    }

    /// Read one framed response.
    pub async fn read_response(&mut self) -> Value {
        let mut header = Vec::new();
        while !header.ends_with(b"\r\n\r\n") {
            header.push(self.stream.read_u8().await.expect("worker sent a header"));
        }
        let header = String::from_utf8(header).expect("ASCII header");
        let length: usize = header
            .trim_end()
            .strip_prefix("Content-Length: ")
            .expect("Content-Length header")
            .parse()
            .expect("numeric length");

        let mut body = vec![0u8; length];
        self.stream.read_exact(&mut body).await.expect("full body");
        serde_json::from_slice(&body).expect("JSON body")
    }

    /// Send `exit` and wait for the worker to stop.
    pub async fn exit(mut self) -> ExitReason {
        self.notify("exit").await;
        self.worker.await.expect("worker task")
    }

    /// Close the pipe and wait for the worker to stop.
    pub async fn hang_up(self) -> ExitReason {
        drop(self.stream);
        self.worker.await.expect("worker task")
    }

    /// Wait for the worker to stop and collect any unread output.
    pub async fn drain(mut self) -> Vec<u8> {
        let _ = self.worker.await;
        let mut rest = Vec::new();
        self.stream.read_to_end(&mut rest).await.expect("readable");
        rest
    }
}

pub fn frame(body: &str) -> Vec<u8> {
    format!("Content-Length: {}\r\n\r\n{}", body.len(), body).into_bytes()
}

pub fn tool_names(initialize: &Value) -> Vec<String> {
    initialize["result"]["capabilities"]["tools"]
        .as_array()
        .expect("tools array")
        .iter()
        .map(|t| t["name"].as_str().expect("tool name").to_string())
        .collect()
}
