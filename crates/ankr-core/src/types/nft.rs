use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{default_flag, default_page_size, null_default, BlockRef, Chain};
use crate::error::CoreError;
use crate::rpc::ApiRequest;

// ==============================================================================
// NFTs By Owner
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetNftsByOwnerRequest {
    pub wallet_address: String,
    /// All supported chains when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<Chain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    /// Contract address to token ids; an empty list matches the whole
    /// collection.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub filter: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NftTrait {
    #[serde(rename = "trait_type")]
    #[serde(deserialize_with = "null_default")]
    pub trait_type: String,
    #[serde(deserialize_with = "null_default")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Nft {
    #[serde(deserialize_with = "null_default")]
    pub blockchain: String,
    #[serde(deserialize_with = "null_default")]
    pub collection_name: String,
    #[serde(deserialize_with = "null_default")]
    pub contract_address: String,
    /// `ERC721` or `ERC1155`.
    #[serde(deserialize_with = "null_default")]
    pub contract_type: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub token_id: String,
    #[serde(deserialize_with = "null_default")]
    pub image_url: String,
    #[serde(deserialize_with = "null_default")]
    pub symbol: String,
    #[serde(deserialize_with = "null_default")]
    pub traits: Vec<NftTrait>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetNftsByOwnerResponse {
    #[serde(deserialize_with = "null_default")]
    pub assets: Vec<Nft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl ApiRequest for GetNftsByOwnerRequest {
    const METHOD: &'static str = "ankr_getNFTsByOwner";
    type Response = GetNftsByOwnerResponse;

    fn with_defaults(mut self) -> Result<Self, CoreError> {
        default_page_size(&mut self.page_size, 50);
        Ok(self)
    }
}

paginated!(GetNftsByOwnerRequest => GetNftsByOwnerResponse);

// ==============================================================================
// NFT Metadata
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetNftMetadataRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<Chain>,
    pub contract_address: String,
    pub token_id: String,
    /// Re-read metadata from the contract instead of the index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_fetch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_sync_check: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NftAttributes {
    #[serde(deserialize_with = "null_default")]
    pub contract_type: String,
    #[serde(deserialize_with = "null_default")]
    pub token_url: String,
    #[serde(deserialize_with = "null_default")]
    pub image_url: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub traits: Vec<NftTrait>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NftMetadata {
    #[serde(deserialize_with = "null_default")]
    pub blockchain: String,
    #[serde(deserialize_with = "null_default")]
    pub contract_address: String,
    #[serde(deserialize_with = "null_default")]
    pub contract_type: String,
    #[serde(deserialize_with = "null_default")]
    pub token_id: String,
    #[serde(deserialize_with = "null_default")]
    pub attributes: NftAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetNftMetadataResponse {
    #[serde(deserialize_with = "null_default")]
    pub metadata: NftMetadata,
}

impl ApiRequest for GetNftMetadataRequest {
    const METHOD: &'static str = "ankr_getNFTMetadata";
    type Response = GetNftMetadataResponse;

    fn with_defaults(self) -> Result<Self, CoreError> {
        if self.contract_address.is_empty() || self.token_id.is_empty() {
            return Err(CoreError::InvalidRequest(
                "contractAddress and tokenId are required".to_owned(),
            ));
        }
        Ok(self)
    }
}

// ==============================================================================
// NFT Holders
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetNftHoldersRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<Chain>,
    pub contract_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetNftHoldersResponse {
    #[serde(deserialize_with = "null_default")]
    pub holders: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl ApiRequest for GetNftHoldersRequest {
    const METHOD: &'static str = "ankr_getNFTHolders";
    type Response = GetNftHoldersResponse;

    fn with_defaults(mut self) -> Result<Self, CoreError> {
        default_page_size(&mut self.page_size, 1000);
        Ok(self)
    }
}

paginated!(GetNftHoldersRequest => GetNftHoldersResponse);

// ==============================================================================
// NFT Transfers
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetNftTransfersRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blockchain: Vec<Chain>,
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
pub struct NftTransfer {
    #[serde(deserialize_with = "null_default")]
    pub block_height: u64,
    #[serde(deserialize_with = "null_default")]
    pub blockchain: String,
    #[serde(deserialize_with = "null_default")]
    pub collection_name: String,
    #[serde(deserialize_with = "null_default")]
    pub collection_symbol: String,
    #[serde(deserialize_with = "null_default")]
    pub contract_address: String,
    #[serde(deserialize_with = "null_default")]
    pub from_address: String,
    #[serde(deserialize_with = "null_default")]
    pub to_address: String,
    #[serde(deserialize_with = "null_default")]
    pub image_url: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub timestamp: u64,
    #[serde(deserialize_with = "null_default")]
    pub token_id: String,
    #[serde(deserialize_with = "null_default")]
    pub transaction_hash: String,
    /// Contract standard, e.g. `ERC721`.
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_default")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetNftTransfersResponse {
    #[serde(deserialize_with = "null_default")]
    pub transfers: Vec<NftTransfer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl ApiRequest for GetNftTransfersRequest {
    const METHOD: &'static str = "ankr_getNftTransfers";
    type Response = GetNftTransfersResponse;

    fn with_defaults(mut self) -> Result<Self, CoreError> {
        default_flag(&mut self.desc_order, true);
        default_page_size(&mut self.page_size, 100);
        Ok(self)
    }
}

paginated!(GetNftTransfersRequest => GetNftTransfersResponse);
