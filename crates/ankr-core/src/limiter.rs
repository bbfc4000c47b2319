//! Token-bucket admission control shared by every outbound call of a client.
//!
//! The bucket holds up to `capacity` tokens and refills continuously at
//! `capacity / window`. Refill is computed lazily from the time elapsed since
//! the previous observation, so no background task is needed. When a caller
//! asks for more tokens than are available, the configured
//! [`RateLimitBehavior`] decides between failing fast and waiting.

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, trace};

use crate::context::Context;
use crate::error::CoreError;

/// What `acquire` does when the bucket cannot cover the requested cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RateLimitBehavior {
    /// Suspend the caller until enough tokens have accrued.
    #[default]
    Block,
    /// Refuse immediately with [`CoreError::RateLimitExceeded`].
    Error,
}

impl fmt::Display for RateLimitBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => write!(f, "block"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl FromStr for RateLimitBehavior {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "error" => Ok(Self::Error),
            other => Err(CoreError::Config(format!(
                "unknown rate limit behavior `{other}`; expected block or error"
            ))),
        }
    }
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

pub struct RateLimiter {
    capacity: u32,
    /// Tokens added per second.
    refill_rate: f64,
    behavior: RateLimitBehavior,
    state: Mutex<Bucket>,
}

impl RateLimiter {
    /// A full bucket of `capacity` tokens that refills completely over `window`.
    pub fn new(
        capacity: u32,
        window: Duration,
        behavior: RateLimitBehavior,
    ) -> Result<Self, CoreError> {
        if capacity == 0 {
            return Err(CoreError::Config(
                "rate limit capacity must be at least 1".to_owned(),
            ));
        }
        if window.is_zero() {
            return Err(CoreError::Config(
                "rate limit window must be non-zero".to_owned(),
            ));
        }

        Ok(Self {
            capacity,
            refill_rate: f64::from(capacity) / window.as_secs_f64(),
            behavior,
            state: Mutex::new(Bucket {
                tokens: f64::from(capacity),
                last_refill: Instant::now(),
            }),
        })
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn behavior(&self) -> RateLimitBehavior {
        self.behavior
    }

    /// Tokens currently in the bucket, after accounting for refill.
    pub fn available(&self) -> f64 {
        let mut bucket = self.lock();
        self.refill(&mut bucket, Instant::now());
        bucket.tokens
    }

    /// Take `cost` tokens if they are available right now, without waiting.
    pub fn try_acquire(&self, cost: u32) -> bool {
        cost <= self.capacity && self.take_or_wait_time(cost).is_ok()
    }

    /// Take `cost` tokens, waiting for refill in [`RateLimitBehavior::Block`]
    /// mode. The lock is only held for the check-and-update step; waiting
    /// happens outside it and observes `ctx`.
    pub async fn acquire(&self, ctx: &Context, cost: u32) -> Result<(), CoreError> {
        if cost == 0 {
            return Ok(());
        }
        if cost > self.capacity {
            return Err(CoreError::CostExceedsCapacity {
                cost,
                capacity: self.capacity,
            });
        }

        loop {
            let wait = match self.take_or_wait_time(cost) {
                Ok(()) => return Ok(()),
                Err(wait) => wait,
            };

            match self.behavior {
                RateLimitBehavior::Error => {
                    debug!(cost, "rate limit exceeded");
                    return Err(CoreError::RateLimitExceeded);
                }
                RateLimitBehavior::Block => {
                    trace!(cost, wait_ms = wait.as_millis() as u64, "waiting for rate limit");
                    ctx.sleep(wait).await?;
                }
            }
        }
    }

    /// Refill, then deduct `cost` or report how long until it would fit.
    fn take_or_wait_time(&self, cost: u32) -> Result<(), Duration> {
        let cost = f64::from(cost);
        let mut bucket = self.lock();
        self.refill(&mut bucket, Instant::now());

        if bucket.tokens >= cost {
            bucket.tokens -= cost;
            return Ok(());
        }

        let deficit = cost - bucket.tokens;
        // Round up to the next millisecond so a woken waiter finds the
        // tokens it slept for instead of spinning on a sub-ms remainder.
        let millis = (deficit / self.refill_rate * 1000.0).ceil().max(1.0);
        Err(Duration::from_millis(millis as u64))
    }

    fn refill(&self, bucket: &mut Bucket, now: Instant) {
        let elapsed = now.saturating_duration_since(bucket.last_refill);
        let added = elapsed.as_secs_f64() * self.refill_rate;
        bucket.tokens = (bucket.tokens + added).min(f64::from(self.capacity));
        bucket.last_refill = now;
    }

    fn lock(&self) -> MutexGuard<'_, Bucket> {
        // The critical section never panics midway, so a poisoned bucket
        // still holds consistent numbers.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("capacity", &self.capacity)
            .field("refill_rate", &self.refill_rate)
            .field("behavior", &self.behavior)
            .finish_non_exhaustive()
    }
}
