//! Shared test helpers for `ankr-core` unit tests.
//!
//! Small request types bound to fake methods, JSON-RPC body builders, and a
//! scripted multi-page backend, so executor and cursor tests share one
//! source of truth for dummy traffic.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::limiter::RateLimiter;
use crate::rpc::mock::{MockTransport, Step};
use crate::rpc::{ApiRequest, Paginated, PaginatedRequest, RequestExecutor, RetryPolicy};

// ==============================================================================
// Response Bodies
// ==============================================================================

pub fn rpc_ok(result: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result,
    }))
    .expect("static JSON encodes")
}

pub fn rpc_error(code: i64, message: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": { "code": code, "message": message },
    }))
    .expect("static JSON encodes")
}

pub fn executor_with(
    transport: &MockTransport,
    limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
) -> RequestExecutor {
    RequestExecutor::new(Arc::new(transport.clone()), limiter, retry)
}

// ==============================================================================
// Fake Methods
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl EchoRequest {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            page_size: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EchoResponse {
    pub value: String,
}

impl ApiRequest for EchoRequest {
    const METHOD: &'static str = "test_echo";
    type Response = EchoResponse;

    fn with_defaults(mut self) -> Result<Self, CoreError> {
        self.page_size.get_or_insert(25);
        Ok(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FailingDefaults;

impl ApiRequest for FailingDefaults {
    const METHOD: &'static str = "test_failing";
    type Response = EchoResponse;

    fn with_defaults(self) -> Result<Self, CoreError> {
        Err(CoreError::InvalidRequest("unsupported field kind".to_owned()))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    pub items: Vec<u32>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl ApiRequest for ListRequest {
    const METHOD: &'static str = "test_list";
    type Response = ListPage;
}

impl PaginatedRequest for ListRequest {
    fn page_token(&self) -> Option<&str> {
        self.page_token.as_deref()
    }

    fn set_page_token(&mut self, token: String) {
        self.page_token = Some(token);
    }
}

impl Paginated for ListPage {
    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }
}

// ==============================================================================
// Scripted Pagination Backend
// ==============================================================================

/// The page token carried by a sent envelope, `""` for the first page.
pub fn sent_page_token(request: &serde_json::Value) -> String {
    request["params"]["pageToken"]
        .as_str()
        .unwrap_or_default()
        .to_owned()
}

/// A backend serving `page_count` pages chained by tokens `p1`, `p2`, ...
/// Page `i` (0-based) holds the single item `i`; the last page has an
/// empty next token.
pub fn paged_responder(
    page_count: u32,
) -> impl Fn(&serde_json::Value) -> Step + Send + Sync + 'static {
    move |request: &serde_json::Value| {
        let token = sent_page_token(request);
        let index: u32 = if token.is_empty() {
            0
        } else {
            token
                .trim_start_matches('p')
                .parse()
                .expect("backend only issues p<N> tokens")
        };
        let next = if index + 1 < page_count {
            format!("p{}", index + 1)
        } else {
            String::new()
        };
        Step::ok(rpc_ok(serde_json::json!({
            "items": [index],
            "nextPageToken": next,
        })))
    }
}
