use serde::{Deserialize, Serialize};

use super::{
    clear_zero_page_size, default_flag, default_page_size, null_default, BlockRef, Chain,
};
use crate::error::CoreError;
use crate::rpc::ApiRequest;

// ==============================================================================
// Account Balance
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAccountBalanceRequest {
    pub wallet_address: String,
    /// Every supported chain when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<Chain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_first: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_whitelisted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenAsset {
    #[serde(deserialize_with = "null_default")]
    pub blockchain: String,
    #[serde(deserialize_with = "null_default")]
    pub holder_address: String,
    #[serde(deserialize_with = "null_default")]
    pub contract_address: String,
    #[serde(deserialize_with = "null_default")]
    pub token_name: String,
    #[serde(deserialize_with = "null_default")]
    pub token_symbol: String,
    #[serde(deserialize_with = "null_default")]
    pub token_decimals: u32,
    /// `NATIVE` or `ERC20`.
    #[serde(deserialize_with = "null_default")]
    pub token_type: String,
    #[serde(deserialize_with = "null_default")]
    pub token_price: String,
    #[serde(deserialize_with = "null_default")]
    pub balance: String,
    #[serde(deserialize_with = "null_default")]
    pub balance_raw_integer: String,
    #[serde(deserialize_with = "null_default")]
    pub balance_usd: String,
    #[serde(deserialize_with = "null_default")]
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAccountBalanceResponse {
    #[serde(deserialize_with = "null_default")]
    pub total_balance_usd: String,
    #[serde(deserialize_with = "null_default")]
    pub assets: Vec<TokenAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl ApiRequest for GetAccountBalanceRequest {
    const METHOD: &'static str = "ankr_getAccountBalance";
    type Response = GetAccountBalanceResponse;

    fn with_defaults(mut self) -> Result<Self, CoreError> {
        default_flag(&mut self.native_first, true);
        default_flag(&mut self.only_whitelisted, true);
        clear_zero_page_size(&mut self.page_size);
        Ok(self)
    }
}

paginated!(GetAccountBalanceRequest => GetAccountBalanceResponse);

// ==============================================================================
// Currencies And Prices
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCurrenciesRequest {
    pub blockchain: Chain,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Currency {
    #[serde(deserialize_with = "null_default")]
    pub address: String,
    #[serde(deserialize_with = "null_default")]
    pub blockchain: String,
    #[serde(deserialize_with = "null_default")]
    pub decimals: u32,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub symbol: String,
    #[serde(deserialize_with = "null_default")]
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetCurrenciesResponse {
    #[serde(deserialize_with = "null_default")]
    pub currencies: Vec<Currency>,
}

impl GetCurrenciesRequest {
    pub fn new(blockchain: Chain) -> Self {
        Self { blockchain }
    }
}

impl ApiRequest for GetCurrenciesRequest {
    const METHOD: &'static str = "ankr_getCurrencies";
    type Response = GetCurrenciesResponse;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTokenPriceRequest {
    pub blockchain: Chain,
    /// The chain's native coin when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contract_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetTokenPriceResponse {
    #[serde(deserialize_with = "null_default")]
    pub blockchain: String,
    #[serde(deserialize_with = "null_default")]
    pub contract_address: String,
    #[serde(deserialize_with = "null_default")]
    pub usd_price: String,
}

impl GetTokenPriceRequest {
    /// Price of the chain's native coin.
    pub fn native(blockchain: Chain) -> Self {
        Self::new(blockchain, String::new())
    }

    pub fn new(blockchain: Chain, contract_address: impl Into<String>) -> Self {
        Self {
            blockchain,
            contract_address: contract_address.into(),
        }
    }
}

impl ApiRequest for GetTokenPriceRequest {
    const METHOD: &'static str = "ankr_getTokenPrice";
    type Response = GetTokenPriceResponse;
}

// ==============================================================================
// Holders
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTokenHoldersRequest {
    pub blockchain: Chain,
    pub contract_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenHolder {
    #[serde(deserialize_with = "null_default")]
    pub holder_address: String,
    #[serde(deserialize_with = "null_default")]
    pub balance: String,
    #[serde(deserialize_with = "null_default")]
    pub balance_raw_integer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetTokenHoldersResponse {
    #[serde(deserialize_with = "null_default")]
    pub blockchain: String,
    #[serde(deserialize_with = "null_default")]
    pub contract_address: String,
    #[serde(deserialize_with = "null_default")]
    pub token_decimals: u32,
    #[serde(deserialize_with = "null_default")]
    pub holders: Vec<TokenHolder>,
    #[serde(deserialize_with = "null_default")]
    pub holders_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl GetTokenHoldersRequest {
    pub fn new(blockchain: Chain, contract_address: impl Into<String>) -> Self {
        Self {
            blockchain,
            contract_address: contract_address.into(),
            page_size: None,
            page_token: None,
        }
    }
}

impl ApiRequest for GetTokenHoldersRequest {
    const METHOD: &'static str = "ankr_getTokenHolders";
    type Response = GetTokenHoldersResponse;

    fn with_defaults(mut self) -> Result<Self, CoreError> {
        default_page_size(&mut self.page_size, 10_000);
        Ok(self)
    }
}

paginated!(GetTokenHoldersRequest => GetTokenHoldersResponse);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTokenHoldersCountRequest {
    pub blockchain: Chain,
    pub contract_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// One daily snapshot of a token's holder count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HolderCountHistory {
    #[serde(deserialize_with = "null_default")]
    pub holder_count: u64,
    #[serde(deserialize_with = "null_default")]
    pub last_updated_at: String,
    #[serde(deserialize_with = "null_default")]
    pub total_amount: String,
    #[serde(deserialize_with = "null_default")]
    pub total_amount_raw_integer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetTokenHoldersCountResponse {
    #[serde(deserialize_with = "null_default")]
    pub blockchain: String,
    #[serde(deserialize_with = "null_default")]
    pub contract_address: String,
    #[serde(deserialize_with = "null_default")]
    pub token_decimals: u32,
    #[serde(deserialize_with = "null_default")]
    pub holder_count_history: Vec<HolderCountHistory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl GetTokenHoldersCountRequest {
    pub fn new(blockchain: Chain, contract_address: impl Into<String>) -> Self {
        Self {
            blockchain,
            contract_address: contract_address.into(),
            page_size: None,
            page_token: None,
        }
    }
}

impl ApiRequest for GetTokenHoldersCountRequest {
    const METHOD: &'static str = "ankr_getTokenHoldersCount";
    type Response = GetTokenHoldersCountResponse;

    fn with_defaults(mut self) -> Result<Self, CoreError> {
        default_page_size(&mut self.page_size, 10_000);
        Ok(self)
    }
}

paginated!(GetTokenHoldersCountRequest => GetTokenHoldersCountResponse);

// ==============================================================================
// Token Transfers
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTokenTransfersRequest {
    /// Sender or recipient addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<Chain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc_order: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenTransfer {
    #[serde(deserialize_with = "null_default")]
    pub block_height: u64,
    #[serde(deserialize_with = "null_default")]
    pub blockchain: String,
    #[serde(deserialize_with = "null_default")]
    pub contract_address: String,
    #[serde(deserialize_with = "null_default")]
    pub from_address: String,
    #[serde(deserialize_with = "null_default")]
    pub to_address: String,
    #[serde(deserialize_with = "null_default")]
    pub thumbnail: String,
    #[serde(deserialize_with = "null_default")]
    pub timestamp: u64,
    #[serde(deserialize_with = "null_default")]
    pub token_decimals: u32,
    #[serde(deserialize_with = "null_default")]
    pub token_name: String,
    #[serde(deserialize_with = "null_default")]
    pub token_symbol: String,
    #[serde(deserialize_with = "null_default")]
    pub transaction_hash: String,
    #[serde(deserialize_with = "null_default")]
    pub value: String,
    #[serde(deserialize_with = "null_default")]
    pub value_raw_integer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetTokenTransfersResponse {
    #[serde(deserialize_with = "null_default")]
    pub transfers: Vec<TokenTransfer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl ApiRequest for GetTokenTransfersRequest {
    const METHOD: &'static str = "ankr_getTokenTransfers";
    type Response = GetTokenTransfersResponse;

    fn with_defaults(mut self) -> Result<Self, CoreError> {
        default_flag(&mut self.desc_order, true);
        default_page_size(&mut self.page_size, 10_000);
        Ok(self)
    }
}

paginated!(GetTokenTransfersRequest => GetTokenTransfersResponse);
