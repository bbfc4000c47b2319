//! JSON-RPC 2.0 envelopes as sent to and received from the API endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

pub(crate) const JSONRPC_VERSION: &str = "2.0";

#[derive(Serialize)]
pub(crate) struct JsonRpcRequest<'a, P> {
    pub(crate) id: u64,
    pub(crate) jsonrpc: &'static str,
    pub(crate) method: &'a str,
    pub(crate) params: &'a P,
}

#[derive(Deserialize)]
pub(crate) struct JsonRpcResponse {
    #[serde(default)]
    pub(crate) jsonrpc: Option<String>,
    #[serde(default)]
    pub(crate) id: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) result: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) error: Option<serde_json::Value>,
}

/// Structured error object carried in the `error` member of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code {}: {}", self.code, self.message)?;
        if let Some(data) = &self.data {
            write!(f, " ({data})")?;
        }
        Ok(())
    }
}

/// Parse the raw `error` member into an [`RpcErrorObject`].
///
/// JSON-RPC 2.0 defines errors as `{"code", "message", "data"?}`.
/// Anything else is still a server-reported failure, so it is kept verbatim
/// in `data` under code 0 rather than being treated as a transport fault.
pub(crate) fn parse_jsonrpc_error(err: serde_json::Value) -> RpcErrorObject {
    match serde_json::from_value::<RpcErrorObject>(err.clone()) {
        Ok(parsed) => parsed,
        Err(_) => RpcErrorObject {
            code: 0,
            message: format!("non-standard JSON-RPC error: {err}"),
            data: Some(err),
        },
    }
}
