use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, trace, warn};

use crate::context::Context;
use crate::error::{CoreError, TransportError};
use crate::limiter::RateLimiter;

use super::protocol::{parse_jsonrpc_error, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use super::{ApiRequest, Transport};

/// Bounded, fixed-delay retry around transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Values below 1 act as 1.
    pub max_attempts: u32,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A single attempt, no retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Performs one logical RPC call end to end.
///
/// Every attempt takes one token from the shared [`RateLimiter`], applies
/// request defaults, and sends a fresh envelope. Transport failures are
/// retried up to [`RetryPolicy::max_attempts`]; an `error` member in the
/// response is returned on the spot.
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
    next_id: AtomicU64,
}

impl RequestExecutor {
    pub fn new(transport: Arc<dyn Transport>, limiter: Arc<RateLimiter>, retry: RetryPolicy) -> Self {
        Self {
            transport,
            limiter,
            retry,
            next_id: AtomicU64::new(initial_request_id()),
        }
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Invoke `R::METHOD` with `request` and decode the typed result.
    pub async fn call<R: ApiRequest>(
        &self,
        ctx: &Context,
        request: &R,
    ) -> Result<R::Response, CoreError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.attempt(ctx, request, attempt).await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!(rpc.method = R::METHOD, attempt, "rpc call succeeded after retry");
                    }
                    return Ok(result);
                }
                Err(CoreError::Transport(last)) if attempt >= max_attempts => {
                    warn!(
                        rpc.method = R::METHOD,
                        attempts = attempt,
                        error = %last,
                        "rpc call failed; retries exhausted"
                    );
                    return Err(CoreError::ExhaustedRetries {
                        attempts: attempt,
                        last,
                    });
                }
                Err(CoreError::Transport(err)) => {
                    warn!(
                        rpc.method = R::METHOD,
                        attempt,
                        max_attempts,
                        error = %err,
                        delay_ms = self.retry.delay.as_millis() as u64,
                        "rpc call failed; retrying"
                    );
                    attempt += 1;
                    ctx.sleep(self.retry.delay).await?;
                }
                Err(other) => return Err(other),
            }
        }
    }

    async fn attempt<R: ApiRequest>(
        &self,
        ctx: &Context,
        request: &R,
        attempt: u32,
    ) -> Result<R::Response, CoreError> {
        self.limiter.acquire(ctx, 1).await?;

        let params = request.clone().with_defaults()?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let envelope = JsonRpcRequest {
            id,
            jsonrpc: JSONRPC_VERSION,
            method: R::METHOD,
            params: &params,
        };
        let body = serde_json::to_vec(&envelope).map_err(TransportError::Encode)?;
        debug!(rpc.id = id, rpc.method = R::METHOD, attempt, "rpc call");

        let reply = ctx.run(self.transport.post(body)).await??;
        debug!(
            rpc.id = id,
            rpc.method = R::METHOD,
            status = reply.status,
            body_len = reply.body.len(),
            "rpc response"
        );
        trace!(
            rpc.id = id,
            rpc.method = R::METHOD,
            body = %String::from_utf8_lossy(&reply.body),
            "rpc response body"
        );

        if !reply.is_success() {
            return Err(TransportError::Status {
                status: reply.status,
                body: String::from_utf8_lossy(&reply.body).into_owned(),
            }
            .into());
        }

        let decoded: JsonRpcResponse = serde_json::from_slice(&reply.body).map_err(|e| {
            TransportError::Decode(format!(
                "decode JSON-RPC response: {e}; body={}",
                String::from_utf8_lossy(&reply.body)
            ))
        })?;
        if decoded.id.as_ref().and_then(serde_json::Value::as_u64) != Some(id) {
            trace!(
                rpc.id = id,
                rpc.version = decoded.jsonrpc.as_deref().unwrap_or(""),
                response_id = ?decoded.id,
                "response id does not echo request id"
            );
        }

        if let Some(err) = decoded.error.filter(|e| !e.is_null()) {
            let err = parse_jsonrpc_error(err);
            debug!(rpc.id = id, rpc.method = R::METHOD, code = err.code, "rpc error");
            return Err(CoreError::Protocol(err));
        }

        let result = decoded.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(result).map_err(|e| {
            TransportError::Decode(format!("invalid {} result: {e}", R::METHOD)).into()
        })
    }
}

fn initial_request_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CancelReason;
    use crate::limiter::RateLimitBehavior;
    use crate::rpc::mock::MockTransport;
    use crate::test_util::{executor_with, rpc_error, rpc_ok, EchoRequest, FailingDefaults};

    fn limiter(capacity: u32) -> Arc<RateLimiter> {
        Arc::new(
            RateLimiter::new(capacity, Duration::from_secs(60), RateLimitBehavior::Error)
                .expect("valid limiter"),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn success_returns_typed_result_on_first_attempt() {
        let transport = MockTransport::builder()
            .reply(rpc_ok(serde_json::json!({ "value": "pong" })))
            .build();
        let executor = executor_with(&transport, limiter(10), RetryPolicy::default());

        let out = executor
            .call(&Context::new(), &EchoRequest::new("ping"))
            .await
            .expect("call must succeed");
        assert_eq!(out.value, "pong");
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn protocol_error_is_returned_without_retry() {
        let transport = MockTransport::builder()
            .reply(rpc_error(-32602, "invalid params"))
            .reply(rpc_ok(serde_json::json!({ "value": "never" })))
            .build();
        let executor = executor_with(&transport, limiter(10), RetryPolicy::default());

        let err = executor
            .call(&Context::new(), &EchoRequest::new("ping"))
            .await
            .expect_err("rpc error must surface");
        let rpc = err.rpc_error().expect("must be a protocol error");
        assert_eq!(rpc.code, -32602);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn error_status_is_retried_then_rpc_error_stops_the_loop() {
        let transport = MockTransport::builder()
            .reply_status(500, "upstream exploded")
            .reply(rpc_error(-32000, "bad block range"))
            .build();
        let executor = executor_with(&transport, limiter(10), RetryPolicy::default());

        let err = executor
            .call(&Context::new(), &EchoRequest::new("ping"))
            .await
            .expect_err("second attempt carries an rpc error");
        assert!(matches!(err, CoreError::Protocol(ref e) if e.code == -32000));
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn always_failing_transport_exhausts_exactly_max_attempts() {
        let transport = MockTransport::builder().always_status(503, "unavailable").build();
        let executor = executor_with(&transport, limiter(10), RetryPolicy::default());

        let started = tokio::time::Instant::now();
        let err = executor
            .call(&Context::new(), &EchoRequest::new("ping"))
            .await
            .expect_err("must exhaust retries");
        match err {
            CoreError::ExhaustedRetries { attempts, last } => {
                assert_eq!(attempts, 3);
                assert!(matches!(last, TransportError::Status { status: 503, .. }));
            }
            other => panic!("expected ExhaustedRetries, got {other:?}"),
        }
        assert_eq!(transport.call_count(), 3);
        // Two fixed delays separate three attempts.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(2), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(2_100), "elapsed {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failure_then_success() {
        let transport = MockTransport::builder()
            .reply_network_error("connection reset")
            .reply(b"not json".to_vec())
            .reply(rpc_ok(serde_json::json!({ "value": "third time" })))
            .build();
        let executor = executor_with(&transport, limiter(10), RetryPolicy::default());

        let out = executor
            .call(&Context::new(), &EchoRequest::new("ping"))
            .await
            .expect("third attempt succeeds");
        assert_eq!(out.value, "third time");
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn undecodable_result_is_a_transport_failure() {
        let transport = MockTransport::builder()
            .always(rpc_ok(serde_json::json!({ "unexpected": true })))
            .build();
        let executor = executor_with(&transport, limiter(10), RetryPolicy::default());

        let err = executor
            .call(&Context::new(), &EchoRequest::new("ping"))
            .await
            .expect_err("result shape mismatch");
        assert!(matches!(
            err,
            CoreError::ExhaustedRetries {
                last: TransportError::Decode(_),
                ..
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn each_attempt_consumes_a_token() {
        let transport = MockTransport::builder().always_status(502, "bad gateway").build();
        let limiter = limiter(10);
        let executor = executor_with(&transport, Arc::clone(&limiter), RetryPolicy::default());

        let _ = executor
            .call(&Context::new(), &EchoRequest::new("ping"))
            .await;
        // Two seconds of refill at 10/min is a third of a token.
        let available = limiter.available();
        assert!(available < 7.5 && available > 7.0, "available {available}");
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_limiter_in_error_mode_makes_no_network_call() {
        let transport = MockTransport::builder()
            .always(rpc_ok(serde_json::json!({ "value": "ok" })))
            .build();
        let limiter = limiter(1);
        assert!(limiter.try_acquire(1));
        let executor = executor_with(&transport, limiter, RetryPolicy::default());

        let err = executor
            .call(&Context::new(), &EchoRequest::new("ping"))
            .await
            .expect_err("no tokens left");
        assert!(matches!(err, CoreError::RateLimitExceeded));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_during_retry_delay_stops_the_loop() {
        let transport = MockTransport::builder().always_status(503, "unavailable").build();
        let executor = executor_with(
            &transport,
            limiter(10),
            RetryPolicy {
                max_attempts: 5,
                delay: Duration::from_secs(10),
            },
        );

        let ctx = Context::new().with_timeout(Duration::from_secs(15));
        let err = executor
            .call(&ctx, &EchoRequest::new("ping"))
            .await
            .expect_err("deadline fires during second delay");
        assert!(matches!(
            err,
            CoreError::Cancelled(CancelReason::DeadlineExceeded)
        ));
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_aborts_in_flight_http_call() {
        let transport = MockTransport::builder()
            .latency(Duration::from_secs(30))
            .always(rpc_ok(serde_json::json!({ "value": "late" })))
            .build();
        let executor = executor_with(&transport, limiter(10), RetryPolicy::default());

        let ctx = Context::new().with_timeout(Duration::from_secs(1));
        let err = executor
            .call(&ctx, &EchoRequest::new("ping"))
            .await
            .expect_err("must time out");
        assert!(matches!(err, CoreError::Cancelled(_)));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn defaulting_failure_is_not_retried() {
        let transport = MockTransport::builder()
            .always(rpc_ok(serde_json::json!({ "value": "ok" })))
            .build();
        let executor = executor_with(&transport, limiter(10), RetryPolicy::default());

        let err = executor
            .call(&Context::new(), &FailingDefaults)
            .await
            .expect_err("defaults must fail");
        assert!(matches!(err, CoreError::InvalidRequest(_)));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn envelope_carries_method_version_and_defaulted_params() {
        let transport = MockTransport::builder()
            .always(rpc_ok(serde_json::json!({ "value": "ok" })))
            .build();
        let executor = executor_with(&transport, limiter(10), RetryPolicy::default());

        let request = EchoRequest::new("ping");
        executor
            .call(&Context::new(), &request)
            .await
            .expect("call must succeed");
        executor
            .call(&Context::new(), &request)
            .await
            .expect("call must succeed");

        let sent = transport.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0]["jsonrpc"], "2.0");
        assert_eq!(sent[0]["method"], "test_echo");
        assert_eq!(sent[0]["params"]["message"], "ping");
        assert_eq!(sent[0]["params"]["pageSize"], 25);
        assert!(request.page_size.is_none(), "caller's value is untouched");

        let first_id = sent[0]["id"].as_u64().expect("numeric id");
        let second_id = sent[1]["id"].as_u64().expect("numeric id");
        assert_eq!(second_id, first_id + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_max_attempts_still_tries_once() {
        let transport = MockTransport::builder().always_status(500, "boom").build();
        let executor = executor_with(
            &transport,
            limiter(10),
            RetryPolicy {
                max_attempts: 0,
                delay: Duration::from_secs(1),
            },
        );

        let err = executor
            .call(&Context::new(), &EchoRequest::new("ping"))
            .await
            .expect_err("single attempt fails");
        assert!(matches!(err, CoreError::ExhaustedRetries { attempts: 1, .. }));
        assert_eq!(transport.call_count(), 1);
    }
}
