pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod limiter;
pub mod pages;
pub mod rpc;
pub mod types;

#[cfg(test)]
mod test_util;

pub use client::AnkrClient;
pub use config::ClientConfig;
pub use context::Context;
pub use error::{CancelReason, CoreError, TransportError};
pub use limiter::{RateLimitBehavior, RateLimiter};
pub use pages::PageCursor;
pub use rpc::RetryPolicy;
