//! Message dispatch: lifecycle methods and tool execution.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::lifecycle::{Lifecycle, LifecycleState};
use super::method::Method;
use crate::tools::{ToolError, ToolHandler, ToolRegistry};
use crate::types::{
    InitializeResult, JsonRpcMessage, McpError, RequestId, Response, ServerIdentity,
    ToolExecuteParams,
};

/// Turns decoded messages into at most one response each.
///
/// Owns the connection lifecycle and the frozen tool registry. No branch
/// returns an error: failures become error responses or logged drops.
pub struct ProtocolHandler {
    identity: ServerIdentity,
    registry: ToolRegistry,
    lifecycle: Lifecycle,
}

impl ProtocolHandler {
    /// Create a handler for a worker with the given identity and tools.
    pub fn new(identity: ServerIdentity, registry: ToolRegistry) -> Self {
        Self {
            identity,
            registry,
            lifecycle: Lifecycle::new(),
        }
    }

    /// Worker identity.
    pub fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    /// Registered tools.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Whether the loop must stop.
    pub fn is_terminated(&self) -> bool {
        self.lifecycle.is_terminated()
    }

    /// Record a termination signal observed by the loop.
    pub fn signal_shutdown(&mut self) {
        self.lifecycle.signal_shutdown();
    }

    /// The `initialize` result for this worker.
    pub fn initialize_result(&self) -> InitializeResult {
        InitializeResult::new(self.identity.clone(), self.registry.descriptors())
    }

    /// Handle one message. Returns the response to send, if any.
    pub async fn handle_message(&mut self, msg: JsonRpcMessage) -> Option<Response> {
        if self.lifecycle.is_terminated() {
            tracing::warn!(method = msg.method(), "Message after exit ignored");
            return None;
        }

        let (id, method_name, params) = match msg {
            JsonRpcMessage::Request(req) => (Some(req.id), req.method, req.params),
            JsonRpcMessage::Notification(notif) => (None, notif.method, notif.params),
        };

        tracing::info!(method = %method_name, id = ?id, state = %self.lifecycle.state(), "Handling message");

        let method = Method::parse(&method_name);
        if self.lifecycle.state() == LifecycleState::ShuttingDown && method != Method::Exit {
            tracing::warn!(method = %method_name, id = ?id, "Message received after shutdown");
        }

        let response = match method {
            Method::Initialize => self.handle_initialize(id),
            Method::Shutdown => self.handle_shutdown(id),
            Method::Exit => self.handle_exit(id),
            Method::ToolExecute => self.handle_tool_execute(id, params).await,
            Method::Ignored(name) => {
                tracing::debug!(method = %name, "Ignoring progress/trace notification");
                None
            }
            Method::Unhandled(name) => Self::handle_unhandled(id, name),
        };

        if let Some(resp) = &response {
            match resp.error_object() {
                Some(err) => tracing::info!(
                    method = %method_name,
                    id = %resp.id(),
                    code = err.code,
                    "Responding with error"
                ),
                None => tracing::info!(method = %method_name, id = %resp.id(), "Responding with result"),
            }
        }

        response
    }

    fn handle_initialize(&mut self, id: Option<RequestId>) -> Option<Response> {
        let Some(id) = id else {
            tracing::error!("initialize received without an id; dropped");
            return None;
        };

        self.lifecycle.initialize();
        let result = self.initialize_result();
        match serde_json::to_value(&result) {
            Ok(value) => Some(Response::success(id, value)),
            Err(e) => Some(McpError::InternalError(e.to_string()).into_response(id)),
        }
    }

    fn handle_shutdown(&mut self, id: Option<RequestId>) -> Option<Response> {
        self.lifecycle.shutdown();
        id.map(|id| Response::success(id, Value::Null))
    }

    fn handle_exit(&mut self, id: Option<RequestId>) -> Option<Response> {
        if let Some(id) = &id {
            tracing::warn!(id = %id, "exit sent as a request; no response is sent");
        }
        self.lifecycle.exit();
        None
    }

    async fn handle_tool_execute(
        &mut self,
        id: Option<RequestId>,
        params: Option<Value>,
    ) -> Option<Response> {
        let Some(id) = id else {
            tracing::error!("tool/execute received without an id; dropped");
            return None;
        };

        if self.lifecycle.state() == LifecycleState::Uninitialized {
            tracing::warn!("tool/execute before initialize");
        }

        let params = match ToolExecuteParams::from_params(params.as_ref()) {
            Ok(params) => params,
            Err(e) => {
                tracing::error!(error = %e, "Rejecting tool/execute parameters");
                return Some(e.into_response(id));
            }
        };

        let tool_name = params.tool_name.unwrap_or_default();
        let Some(handler) = self.registry.get(&tool_name) else {
            tracing::error!(tool = %tool_name, "Tool not found");
            return Some(McpError::ToolNotFound(tool_name).into_response(id));
        };

        tracing::debug!(tool = %tool_name, arguments = ?params.arguments, "Invoking tool");
        Some(match invoke_isolated(handler, params.arguments).await {
            Ok(Ok(result)) => {
                tracing::info!(tool = %tool_name, "Tool executed successfully");
                Response::success(id, result)
            }
            Ok(Err(e)) => {
                tracing::error!(tool = %tool_name, error = %e, "Tool execution failed");
                McpError::ToolExecution(e.to_string()).into_response(id)
            }
            Err(e) => {
                tracing::error!(tool = %tool_name, error = %e, "Tool handler panicked");
                e.into_response(id)
            }
        })
    }

    fn handle_unhandled(id: Option<RequestId>, method: String) -> Option<Response> {
        match id {
            Some(id) => {
                tracing::error!(method = %method, "Method not found");
                Some(McpError::MethodNotFound(method).into_response(id))
            }
            None => {
                tracing::warn!(method = %method, "Unknown notification dropped");
                None
            }
        }
    }
}

/// Run a handler on its own task and wait for it.
///
/// The task is awaited before anything else happens, so invocations still
/// never overlap; the task boundary only turns a panic into an error.
async fn invoke_isolated(
    handler: Arc<dyn ToolHandler>,
    arguments: Map<String, Value>,
) -> Result<Result<Value, ToolError>, McpError> {
    tokio::spawn(async move { handler.invoke(arguments).await })
        .await
        .map_err(|e| McpError::InternalError(format!("tool handler aborted: {e}")))
}
