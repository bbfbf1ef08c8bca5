//! `execute_command` tool: Run a program and capture its output.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::process::Command;

use toolwire::tools::parse_arguments;
use toolwire::types::ToolDescriptor;
use toolwire::{ToolError, ToolHandler};

#[derive(Debug, Deserialize)]
struct ExecuteParams {
    command: String,
    #[serde(default)]
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout_secs: Option<i64>,
}

/// Return the tool definition for execute_command.
pub fn definition() -> ToolDescriptor {
    ToolDescriptor::new(
        "execute_command",
        "Executes a program with arguments and returns its output",
    )
    .with_schema(json!({
        "type": "object",
        "properties": {
            "command": { "type": "string", "description": "Program to run" },
            "args": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Arguments passed to the program"
            },
            "working_dir": { "type": "string", "description": "Directory to run in" },
            "timeout_secs": { "type": "integer", "description": "Seconds before the program is killed" }
        },
        "required": ["command"]
    }))
}

/// Handler for execute_command.
pub struct ExecuteCommand {
    default_timeout: Duration,
}

impl ExecuteCommand {
    /// Create the handler with the timeout used when a call passes none.
    pub fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }
}

#[async_trait]
impl ToolHandler for ExecuteCommand {
    async fn invoke(&self, arguments: Map<String, Value>) -> Result<Value, ToolError> {
        let params: ExecuteParams = parse_arguments(arguments)?;

        if params.command.trim().is_empty() {
            return Err(ToolError::invalid("Command cannot be empty"));
        }
        let timeout = match params.timeout_secs {
            Some(secs) if secs <= 0 => {
                return Err(ToolError::invalid("timeout_secs must be positive"))
            }
            Some(secs) => Duration::from_secs(secs.unsigned_abs()),
            None => self.default_timeout,
        };
        if let Some(dir) = &params.working_dir {
            if !dir.is_dir() {
                return Err(ToolError::invalid(format!(
                    "Working directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        tracing::info!(
            command = %params.command,
            args = ?params.args,
            working_dir = ?params.working_dir,
            timeout_secs = timeout.as_secs(),
            "Executing command"
        );

        let mut cmd = Command::new(&params.command);
        cmd.args(&params.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &params.working_dir {
            cmd.current_dir(dir);
        }

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                let kind = match e.kind() {
                    ErrorKind::NotFound => "NotFound",
                    ErrorKind::PermissionDenied => "PermissionDenied",
                    _ => "ExecutionError",
                };
                tracing::warn!(command = %params.command, error = %e, "Failed to start command");
                return Ok(failure(kind, Value::Null, e.to_string()));
            }
        };

        // Dropping the future on timeout drops the child, which kills it.
        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let exit_code = output.status.code().unwrap_or(-1);
                tracing::info!(command = %params.command, exit_code, "Command finished");
                Ok(json!({
                    "exit_code": exit_code,
                    "stdout": String::from_utf8_lossy(&output.stdout),
                    "stderr": String::from_utf8_lossy(&output.stderr),
                    "success": output.status.success(),
                }))
            }
            Ok(Err(e)) => {
                tracing::warn!(command = %params.command, error = %e, "Failed to collect command output");
                Ok(failure("ExecutionError", json!(-1), e.to_string()))
            }
            Err(_) => {
                tracing::warn!(command = %params.command, timeout_secs = timeout.as_secs(), "Command timed out");
                Ok(failure(
                    "TimedOut",
                    Value::Null,
                    format!("Command timed out after {} seconds", timeout.as_secs()),
                ))
            }
        }
    }
}

fn failure(kind: &str, exit_code: Value, stderr: String) -> Value {
    json!({
        "exit_code": exit_code,
        "stdout": "",
        "stderr": stderr,
        "success": false,
        "error": kind,
    })
}
