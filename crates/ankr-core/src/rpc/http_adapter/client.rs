use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tracing::trace;

use crate::error::{CoreError, TransportError};

use crate::rpc::{HttpReply, Transport};

/// JSON POSTs to a single endpoint URL over a pooled `reqwest` client.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: String, timeout: Duration, connect_timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| CoreError::Config(format!("build HTTP client: {e}")))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, body: Vec<u8>) -> Result<HttpReply, TransportError> {
        let response = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        trace!(%status, body_len = body.len(), "http reply");

        Ok(HttpReply {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}
