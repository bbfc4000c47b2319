//! Typed facade over the Advanced API.
//!
//! One [`AnkrClient`] owns a single rate limiter and executor; every method
//! call and every page cursor it hands out draws from the same token
//! bucket. The client is cheap to share behind an `Arc`.

use std::sync::Arc;

use tracing::debug;

use crate::config::ClientConfig;
use crate::context::Context;
use crate::error::CoreError;
use crate::limiter::RateLimiter;
use crate::pages::PageCursor;
use crate::rpc::{
    endpoint_url, ApiRequest, HttpTransport, PaginatedRequest, RequestExecutor, Transport,
};
use crate::types::*;

pub struct AnkrClient {
    executor: Arc<RequestExecutor>,
}

impl AnkrClient {
    /// Build a client talking HTTPS to `config.base_url`.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let url = endpoint_url(&config.base_url, &config.api_key)?;
        let transport = HttpTransport::new(url, config.timeout, config.connect_timeout)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Build a client over a caller-provided transport. The endpoint and
    /// timeout settings of `config` are ignored.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let limiter = Arc::new(RateLimiter::new(
            config.rate_limit,
            config.rate_window,
            config.on_rate_limit,
        )?);
        debug!(?config, "client ready");
        Ok(Self {
            executor: Arc::new(RequestExecutor::new(transport, limiter, config.retry)),
        })
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        self.executor.limiter()
    }

    /// Invoke any request type, including ones defined outside this crate.
    pub async fn call<R: ApiRequest>(
        &self,
        ctx: &Context,
        request: &R,
    ) -> Result<R::Response, CoreError> {
        self.executor.call(ctx, request).await
    }

    /// A cursor starting at `request`'s page token.
    pub fn pages<R: PaginatedRequest>(&self, request: R) -> PageCursor<R> {
        PageCursor::new(Arc::clone(&self.executor), request)
    }

    // ==========================================================================
    // NFT API
    // ==========================================================================

    pub fn get_nfts_by_owner(
        &self,
        request: GetNftsByOwnerRequest,
    ) -> PageCursor<GetNftsByOwnerRequest> {
        self.pages(request)
    }

    pub async fn get_nft_metadata(
        &self,
        ctx: &Context,
        request: &GetNftMetadataRequest,
    ) -> Result<GetNftMetadataResponse, CoreError> {
        self.call(ctx, request).await
    }

    pub fn get_nft_holders(&self, request: GetNftHoldersRequest) -> PageCursor<GetNftHoldersRequest> {
        self.pages(request)
    }

    pub fn get_nft_transfers(
        &self,
        request: GetNftTransfersRequest,
    ) -> PageCursor<GetNftTransfersRequest> {
        self.pages(request)
    }

    // ==========================================================================
    // Query API
    // ==========================================================================

    pub async fn get_blockchain_stats(
        &self,
        ctx: &Context,
        request: &GetBlockchainStatsRequest,
    ) -> Result<GetBlockchainStatsResponse, CoreError> {
        self.call(ctx, request).await
    }

    pub async fn get_blocks(
        &self,
        ctx: &Context,
        request: &GetBlocksRequest,
    ) -> Result<GetBlocksResponse, CoreError> {
        self.call(ctx, request).await
    }

    pub fn get_logs(&self, request: GetLogsRequest) -> PageCursor<GetLogsRequest> {
        self.pages(request)
    }

    pub async fn get_transactions_by_hash(
        &self,
        ctx: &Context,
        request: &GetTransactionsByHashRequest,
    ) -> Result<GetTransactionsByHashResponse, CoreError> {
        self.call(ctx, request).await
    }

    pub fn get_transactions_by_address(
        &self,
        request: GetTransactionsByAddressRequest,
    ) -> PageCursor<GetTransactionsByAddressRequest> {
        self.pages(request)
    }

    pub async fn get_interactions(
        &self,
        ctx: &Context,
        request: &GetInteractionsRequest,
    ) -> Result<GetInteractionsResponse, CoreError> {
        self.call(ctx, request).await
    }

    // ==========================================================================
    // Token API
    // ==========================================================================

    pub fn get_account_balances(
        &self,
        request: GetAccountBalanceRequest,
    ) -> PageCursor<GetAccountBalanceRequest> {
        self.pages(request)
    }

    pub async fn get_currencies(
        &self,
        ctx: &Context,
        request: &GetCurrenciesRequest,
    ) -> Result<GetCurrenciesResponse, CoreError> {
        self.call(ctx, request).await
    }

    pub async fn get_token_price(
        &self,
        ctx: &Context,
        request: &GetTokenPriceRequest,
    ) -> Result<GetTokenPriceResponse, CoreError> {
        self.call(ctx, request).await
    }

    pub fn get_token_holders(
        &self,
        request: GetTokenHoldersRequest,
    ) -> PageCursor<GetTokenHoldersRequest> {
        self.pages(request)
    }

    pub fn get_token_holder_count_histories(
        &self,
        request: GetTokenHoldersCountRequest,
    ) -> PageCursor<GetTokenHoldersCountRequest> {
        self.pages(request)
    }

    pub fn get_token_transfers(
        &self,
        request: GetTokenTransfersRequest,
    ) -> PageCursor<GetTokenTransfersRequest> {
        self.pages(request)
    }
}
