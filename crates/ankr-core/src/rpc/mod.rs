//! JSON-RPC layer: method bindings, the HTTP transport seam, and the
//! executor that turns a typed request into a rate-limited, retried call.
//!
//! Every API method is a request type implementing [`ApiRequest`], which
//! fixes its wire method name and response type at compile time. Paginated
//! methods additionally implement [`PaginatedRequest`].

mod executor;
mod http_adapter;
#[cfg(test)]
pub(crate) mod mock;
pub mod protocol;

pub use executor::{RequestExecutor, RetryPolicy};
pub use http_adapter::{endpoint_url, HttpTransport};
pub use protocol::RpcErrorObject;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CoreError, TransportError};

/// A request type bound to one RPC method and its response type.
pub trait ApiRequest: Serialize + Clone + Send + Sync + 'static {
    /// Wire method name, e.g. `ankr_getBlockchainStats`.
    const METHOD: &'static str;

    type Response: DeserializeOwned + Send + 'static;

    /// Fill unset optional fields with the API's documented defaults.
    ///
    /// Called on a fresh copy before each attempt is serialized; the
    /// caller's value is never modified.
    fn with_defaults(self) -> Result<Self, CoreError> {
        Ok(self)
    }
}

/// A request whose results are split across pages by a continuation token.
pub trait PaginatedRequest: ApiRequest<Response: Paginated> {
    fn page_token(&self) -> Option<&str>;

    fn set_page_token(&mut self, token: String);
}

/// A response page that may carry a token for the following page.
pub trait Paginated {
    /// The token for the next page. `None` or an empty string marks the
    /// final page.
    fn next_page_token(&self) -> Option<&str>;
}

/// Raw HTTP reply as seen by the executor, before any classification.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP POST to the API endpoint.
///
/// Implementations own connection management and timeouts. Errors returned
/// here are always transport-level; status codes are classified by the
/// executor.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, body: Vec<u8>) -> Result<HttpReply, TransportError>;
}
