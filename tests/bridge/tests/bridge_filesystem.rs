//! Filesystem and command workers driven through the wire protocol.

mod common;

use serde_json::json;

use toolwire::{ExitReason, ServerConfig};
use toolwire_servers::Worker;

use common::{tool_names, Host};

#[tokio::test]
async fn test_filesystem_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ServerConfig::default();
    config.filesystem.root = Some(dir.path().to_path_buf());
    let mut host = Host::spawn(Worker::Filesystem, &config);

    let init = host.request(1, "initialize", json!({})).await;
    assert_eq!(init["result"]["serverInfo"]["name"], "filesystem-mcp");
    assert_eq!(
        tool_names(&init),
        vec!["delete_file", "get_current_dir", "list_directory", "read_file", "write_file"]
    );

    let written = host
        .call_tool(
            2,
            "write_file",
            json!({"path": "docs/readme.md", "content": "# hi\n", "create_dirs": true}),
        )
        .await;
    assert_eq!(written["result"], json!({"success": true}));

    let listed = host.call_tool(3, "list_directory", json!({"path": "docs"})).await;
    let files = listed["result"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "readme.md");
    assert_eq!(files[0]["size"], 5);

    let read = host.call_tool(4, "read_file", json!({"path": "docs/readme.md"})).await;
    assert_eq!(read["result"]["content"], "# hi\n");

    let deleted = host.call_tool(5, "delete_file", json!({"path": "docs"})).await;
    assert_eq!(deleted["result"]["success"], true);
    assert!(!dir.path().join("docs").exists());

    let gone = host.call_tool(6, "read_file", json!({"path": "docs/readme.md"})).await;
    assert_eq!(gone["error"]["code"], -32000);
    assert!(gone["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Tool execution error: File not found"));

    host.request(7, "shutdown", json!(null)).await;
    assert_eq!(host.exit().await, ExitReason::Exit);
}

#[tokio::test]
async fn test_command_worker_round_trip() {
    let mut config = ServerConfig::default();
    config.command.default_timeout_secs = 5;
    let mut host = Host::spawn(Worker::Command, &config);

    let init = host.request(1, "initialize", json!({})).await;
    assert_eq!(init["result"]["serverInfo"]["name"], "command-mcp");

    let ran = host
        .call_tool(2, "execute_command", json!({"command": "printf", "args": ["%s", "ok"]}))
        .await;
    assert_eq!(ran["result"]["stdout"], "ok");
    assert_eq!(ran["result"]["success"], true);

    let env = host
        .call_tool(3, "get_environment_variable", json!({"name": "TOOLWIRE_BRIDGE_UNSET"}))
        .await;
    assert_eq!(env["result"]["exists"], false);

    let invalid = host.call_tool(4, "execute_command", json!({"command": ""})).await;
    assert_eq!(invalid["error"]["code"], -32000);

    assert_eq!(host.hang_up().await, ExitReason::EndOfStream);
}
