//! Caller-supplied cancellation and deadline for a single logical call.
//!
//! Every suspension point in the client (rate-limiter wait, HTTP exchange,
//! retry delay, cursor lock) races its future against the [`Context`] and
//! aborts with [`CoreError::Cancelled`] as soon as the context fires.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{CancelReason, CoreError};

#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that never fires on its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the context to an externally owned cancellation token.
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Add a deadline `timeout` from now. An earlier existing deadline wins.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// A context cancelled together with this one but independently
    /// cancellable, keeping the same deadline.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the reason this context has fired, if it has.
    pub fn done(&self) -> Option<CancelReason> {
        if self.token.is_cancelled() {
            return Some(CancelReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// Drive `fut` to completion unless the context fires first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, CoreError> {
        if let Some(reason) = self.done() {
            return Err(CoreError::Cancelled(reason));
        }

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(CoreError::Cancelled(CancelReason::Cancelled)),
            _ = expired => Err(CoreError::Cancelled(CancelReason::DeadlineExceeded)),
            out = fut => Ok(out),
        }
    }

    /// Sleep for `duration`, waking early with an error if the context fires.
    pub async fn sleep(&self, duration: Duration) -> Result<(), CoreError> {
        self.run(tokio::time::sleep(duration)).await
    }
}
