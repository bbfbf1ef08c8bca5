//! Message body decoding and response encoding.

use serde_json::{Map, Value};

use crate::types::{
    json_type_name, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, RequestId, Response,
    JSONRPC_VERSION,
};

/// Why a message body could not be turned into a request or notification.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Not valid JSON, or a required member is missing or mistyped.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Valid JSON whose top level is not an object.
    #[error("message is a JSON {0}, not an object")]
    NotAnObject(&'static str),
}

/// Decode a message body.
///
/// A non-null `id` makes the message a request; an absent or null `id` makes
/// it a notification.
pub fn decode(body: &str) -> Result<JsonRpcMessage, CodecError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| CodecError::ParseError(e.to_string()))?;

    let mut object = match value {
        Value::Object(object) => object,
        other => return Err(CodecError::NotAnObject(json_type_name(&other))),
    };

    let method = match object.remove("method") {
        Some(Value::String(method)) => method,
        Some(other) => {
            return Err(CodecError::ParseError(format!(
                "method must be a string, got {}",
                json_type_name(&other)
            )))
        }
        None => return Err(CodecError::ParseError("missing method".to_string())),
    };

    let jsonrpc = take_version(&mut object);
    let params = object.remove("params");

    match object.remove("id") {
        None | Some(Value::Null) => Ok(JsonRpcMessage::Notification(JsonRpcNotification {
            jsonrpc,
            method,
            params,
        })),
        Some(raw_id) => {
            let id = parse_id(raw_id)?;
            Ok(JsonRpcMessage::Request(JsonRpcRequest {
                jsonrpc,
                id,
                method,
                params,
            }))
        }
    }
}

/// Encode a response into the bytes that follow its header.
///
/// Field order is fixed (`jsonrpc`, `id`, then `result` or `error`), so equal
/// responses always encode to equal bytes.
pub fn encode(response: &Response) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(response)
}

fn take_version(object: &mut Map<String, Value>) -> String {
    match object.remove("jsonrpc") {
        Some(Value::String(version)) => version,
        _ => JSONRPC_VERSION.to_string(),
    }
}

fn parse_id(raw: Value) -> Result<RequestId, CodecError> {
    match raw {
        Value::String(s) => Ok(RequestId::String(s)),
        Value::Number(n) => n
            .as_i64()
            .map(RequestId::Number)
            .or_else(|| n.as_u64().map(RequestId::Unsigned))
            .ok_or_else(|| {
                CodecError::ParseError(format!("id must be an integer or string, got {n}"))
            }),
        other => Err(CodecError::ParseError(format!(
            "id must be an integer or string, got {}",
            json_type_name(&other)
        ))),
    }
}
