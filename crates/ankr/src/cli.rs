use std::time::Duration;

use ankr_core::config::DEFAULT_BASE_URL;
use ankr_core::types::{BlockRef, Chain};
use ankr_core::{ClientConfig, RateLimitBehavior, RetryPolicy};
use clap::{Parser, Subcommand};

/// Query the Ankr Advanced multichain API from the command line.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// API key appended to the endpoint path. Omit for public access.
    #[arg(long, env = "ANKR_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// Multichain endpoint base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "ANKR_ENDPOINT")]
    pub endpoint: String,

    /// Calls allowed per rate window.
    #[arg(long, default_value = "1000")]
    pub rate_limit: u32,

    /// Length of the rate window in seconds.
    #[arg(long, default_value = "60")]
    pub rate_window_secs: u64,

    /// What to do when the rate limit is reached: `block` or `error`.
    #[arg(long, default_value = "block")]
    pub on_rate_limit: RateLimitBehavior,

    /// Per-attempt HTTP timeout in seconds.
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Attempts per call, including the first one.
    #[arg(long, default_value = "3")]
    pub attempts: u32,

    /// Pause between attempts in milliseconds.
    #[arg(long, default_value = "1000")]
    pub retry_delay_ms: u64,

    /// Overall deadline for the command in seconds, covering every attempt,
    /// retry pause, rate-limit wait and page. No deadline when omitted.
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chain statistics: latest block, block time, native coin price.
    Stats {
        /// Every supported chain when omitted.
        #[arg(long)]
        chain: Option<Chain>,
    },
    /// Blocks in a height range, newest first.
    Blocks {
        #[arg(long)]
        chain: Chain,
        /// Height, hex height, or a tag such as `latest`.
        #[arg(long, value_parser = parse_block_ref)]
        from: BlockRef,
        #[arg(long, value_parser = parse_block_ref)]
        to: BlockRef,
        #[arg(long)]
        include_logs: bool,
    },
    /// Token balances held by a wallet.
    Balances {
        #[arg(long)]
        wallet: String,
        #[arg(long)]
        chain: Option<Chain>,
        /// Include tokens outside the curated whitelist.
        #[arg(long)]
        all_tokens: bool,
        #[arg(long, default_value = "1")]
        max_pages: usize,
    },
    /// NFTs owned by a wallet.
    Nfts {
        #[arg(long)]
        wallet: String,
        #[arg(long)]
        chain: Option<Chain>,
        #[arg(long, default_value = "1")]
        max_pages: usize,
    },
    /// USD price of a token, or of the native coin when no contract is given.
    Price {
        #[arg(long)]
        chain: Chain,
        #[arg(long, default_value = "")]
        contract: String,
    },
    /// Currencies known on a chain.
    Currencies {
        #[arg(long)]
        chain: Chain,
    },
    /// Holders of an ERC-20 token.
    Holders {
        #[arg(long)]
        chain: Chain,
        #[arg(long)]
        contract: String,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long, default_value = "1")]
        max_pages: usize,
    },
    /// Chains on which an address has any activity.
    Interactions {
        #[arg(long)]
        address: String,
    },
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_key.clone())
            .with_base_url(self.endpoint.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_rate_limit(
                self.rate_limit,
                Duration::from_secs(self.rate_window_secs),
                self.on_rate_limit,
            )
            .with_retry(RetryPolicy {
                max_attempts: self.attempts,
                delay: Duration::from_millis(self.retry_delay_ms),
            })
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

fn parse_block_ref(raw: &str) -> Result<BlockRef, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("block reference must not be empty".to_owned());
    }
    Ok(match raw.parse::<u64>() {
        Ok(height) => BlockRef::Number(height),
        Err(_) => BlockRef::Tag(raw.to_owned()),
    })
}
