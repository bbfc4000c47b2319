use std::fmt;

use crate::rpc::protocol::RpcErrorObject;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("rpc error: {0}")]
    Protocol(RpcErrorObject),

    #[error("rate limit exceeded")]
    RateLimitExceeded,

    #[error("rate limit cost {cost} exceeds bucket capacity {capacity}")]
    CostExceedsCapacity { cost: u32, capacity: u32 },

    #[error("call aborted: {0}")]
    Cancelled(CancelReason),

    #[error("failed to post after {attempts} attempts, last error: {last}")]
    ExhaustedRetries {
        attempts: u32,
        #[source]
        last: TransportError,
    },

    #[error("no more pages for {method}")]
    PagesExhausted { method: &'static str },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// Whether the executor retries this error on the next attempt.
    ///
    /// Only transport-level failures are transient. A structured RPC error
    /// is the server's final answer for the given parameters.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The structured RPC error, if the server returned one.
    pub fn rpc_error(&self) -> Option<&RpcErrorObject> {
        match self {
            Self::Protocol(err) => Some(err),
            _ => None,
        }
    }
}

/// Failures below the JSON-RPC layer: network, HTTP status, (de)serialization.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("encode JSON-RPC request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("{0}")]
    Decode(String),

    /// Connection-level failure reported by a custom [`Transport`](crate::rpc::Transport).
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Cancelled,
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "context cancelled"),
            Self::DeadlineExceeded => write!(f, "context deadline exceeded"),
        }
    }
}
