use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;

use super::{HttpReply, Transport};

type Responder = Box<dyn Fn(&serde_json::Value) -> Step + Send + Sync>;

/// What the mock does for one POST.
#[derive(Debug, Clone)]
pub enum Step {
    Reply(HttpReply),
    NetworkError(String),
}

impl Step {
    pub fn ok(body: Vec<u8>) -> Self {
        Self::Reply(HttpReply { status: 200, body })
    }
}

/// A scripted transport for tests. Records every request body and answers
/// from, in order of precedence: the queued script, the responder
/// function, then the fallback step.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Inner>,
}

struct Inner {
    script: Mutex<VecDeque<Step>>,
    responder: Option<Responder>,
    fallback: Option<Step>,
    latency: Option<Duration>,
    calls: AtomicUsize,
    requests: Mutex<Vec<serde_json::Value>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            script: VecDeque::new(),
            responder: None,
            fallback: None,
            latency: None,
        }
    }

    /// Number of POSTs started, including ones that were later cancelled.
    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// Decoded request envelopes, in the order they were sent.
    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.inner
            .requests
            .lock()
            .expect("mock request log lock")
            .clone()
    }
}

pub struct MockTransportBuilder {
    script: VecDeque<Step>,
    responder: Option<Responder>,
    fallback: Option<Step>,
    latency: Option<Duration>,
}

impl MockTransportBuilder {
    pub fn reply(mut self, body: Vec<u8>) -> Self {
        self.script.push_back(Step::ok(body));
        self
    }

    pub fn reply_status(mut self, status: u16, body: &str) -> Self {
        self.script.push_back(Step::Reply(HttpReply {
            status,
            body: body.as_bytes().to_vec(),
        }));
        self
    }

    pub fn reply_network_error(mut self, message: &str) -> Self {
        self.script.push_back(Step::NetworkError(message.to_owned()));
        self
    }

    pub fn always(mut self, body: Vec<u8>) -> Self {
        self.fallback = Some(Step::ok(body));
        self
    }

    pub fn always_status(mut self, status: u16, body: &str) -> Self {
        self.fallback = Some(Step::Reply(HttpReply {
            status,
            body: body.as_bytes().to_vec(),
        }));
        self
    }

    /// Answer from a function of the decoded request envelope.
    pub fn respond_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&serde_json::Value) -> Step + Send + Sync + 'static,
    {
        self.responder = Some(Box::new(f));
        self
    }

    /// Delay every reply, to hold calls in flight.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            inner: Arc::new(Inner {
                script: Mutex::new(self.script),
                responder: self.responder,
                fallback: self.fallback,
                latency: self.latency,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, body: Vec<u8>) -> Result<HttpReply, TransportError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        let request: serde_json::Value =
            serde_json::from_slice(&body).expect("executor must send valid JSON");
        self.inner
            .requests
            .lock()
            .expect("mock request log lock")
            .push(request.clone());

        if let Some(latency) = self.inner.latency {
            tokio::time::sleep(latency).await;
        }

        let scripted = self
            .inner
            .script
            .lock()
            .expect("mock script lock")
            .pop_front();
        let step = match (scripted, &self.inner.responder, &self.inner.fallback) {
            (Some(step), _, _) => step,
            (None, Some(responder), _) => responder(&request),
            (None, None, Some(fallback)) => fallback.clone(),
            (None, None, None) => Step::NetworkError("mock script exhausted".to_owned()),
        };

        match step {
            Step::Reply(reply) => Ok(reply),
            Step::NetworkError(message) => Err(TransportError::Network(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn script_is_consumed_before_fallback() {
        let mock = MockTransport::builder()
            .reply(b"first".to_vec())
            .always_status(503, "later")
            .build();

        let first = mock.post(b"{}".to_vec()).await.expect("scripted reply");
        assert_eq!(first.body, b"first");
        let second = mock.post(b"{}".to_vec()).await.expect("fallback reply");
        assert_eq!(second.status, 503);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn exhausted_script_without_fallback_is_a_network_error() {
        let mock = MockTransport::builder().build();
        let err = mock.post(b"{}".to_vec()).await.expect_err("nothing scripted");
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[tokio::test]
    async fn responder_sees_decoded_request() {
        let mock = MockTransport::builder()
            .respond_with(|req| Step::ok(req["method"].to_string().into_bytes()))
            .build();
        let reply = mock
            .post(br#"{"method":"ankr_getLogs"}"#.to_vec())
            .await
            .expect("responder reply");
        assert_eq!(reply.body, br#""ankr_getLogs""#);
        assert_eq!(mock.requests()[0]["method"], "ankr_getLogs");
    }
}
