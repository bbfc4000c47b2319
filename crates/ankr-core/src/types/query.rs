use serde::{Deserialize, Serialize};

use super::{clear_zero_page_size, default_flag, null_default, BlockRef, Chain};
use crate::error::CoreError;
use crate::rpc::ApiRequest;

// ==============================================================================
// Blockchain Stats
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBlockchainStatsRequest {
    /// Every supported chain when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<Chain>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockchainStat {
    #[serde(deserialize_with = "null_default")]
    pub blockchain: String,
    #[serde(deserialize_with = "null_default")]
    pub total_transactions_count: u64,
    #[serde(deserialize_with = "null_default")]
    pub total_events_count: u64,
    #[serde(deserialize_with = "null_default")]
    pub latest_block_number: u64,
    #[serde(deserialize_with = "null_default")]
    pub block_time_ms: u64,
    #[serde(deserialize_with = "null_default")]
    pub native_coin_usd_price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetBlockchainStatsResponse {
    #[serde(deserialize_with = "null_default")]
    pub stats: Vec<BlockchainStat>,
}

impl ApiRequest for GetBlockchainStatsRequest {
    const METHOD: &'static str = "ankr_getBlockchainStats";
    type Response = GetBlockchainStatsResponse;
}

// ==============================================================================
// Blocks
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBlocksRequest {
    pub blockchain: Chain,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc_order: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_txs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_logs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_logs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_tx_data: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EthBlockDetails {
    #[serde(deserialize_with = "null_default")]
    pub difficulty: String,
    #[serde(deserialize_with = "null_default")]
    pub extra_data: String,
    #[serde(deserialize_with = "null_default")]
    pub gas_limit: u64,
    #[serde(deserialize_with = "null_default")]
    pub gas_used: u64,
    #[serde(deserialize_with = "null_default")]
    pub miner: String,
    #[serde(deserialize_with = "null_default")]
    pub nonce: String,
    #[serde(deserialize_with = "null_default")]
    pub sha3_uncles: String,
    #[serde(deserialize_with = "null_default")]
    pub size: String,
    #[serde(deserialize_with = "null_default")]
    pub state_root: String,
    #[serde(deserialize_with = "null_default")]
    pub total_difficulty: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eth_block: Option<EthBlockDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Block {
    #[serde(rename = "hash")]
    #[serde(deserialize_with = "null_default")]
    pub block_hash: String,
    /// Hex-encoded height.
    #[serde(rename = "number")]
    #[serde(deserialize_with = "null_default")]
    pub block_height: String,
    #[serde(rename = "blockchain")]
    #[serde(deserialize_with = "null_default")]
    pub blockchain_name: String,
    #[serde(deserialize_with = "null_default")]
    pub blockchain_logo: String,
    #[serde(deserialize_with = "null_default")]
    pub details: BlockDetails,
    #[serde(deserialize_with = "null_default")]
    pub logs_bloom: String,
    #[serde(deserialize_with = "null_default")]
    pub mix_hash: String,
    #[serde(deserialize_with = "null_default")]
    pub nonce: String,
    #[serde(deserialize_with = "null_default")]
    pub parent_hash: String,
    #[serde(deserialize_with = "null_default")]
    pub receipts_root: String,
    #[serde(deserialize_with = "null_default")]
    pub sha3_uncles: String,
    #[serde(deserialize_with = "null_default")]
    pub state_root: String,
    #[serde(deserialize_with = "null_default")]
    pub miner: String,
    #[serde(deserialize_with = "null_default")]
    pub difficulty: String,
    #[serde(deserialize_with = "null_default")]
    pub extra_data: String,
    #[serde(deserialize_with = "null_default")]
    pub size: String,
    #[serde(deserialize_with = "null_default")]
    pub gas_limit: String,
    #[serde(deserialize_with = "null_default")]
    pub gas_used: String,
    #[serde(deserialize_with = "null_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "null_default")]
    pub transactions_root: String,
    #[serde(deserialize_with = "null_default")]
    pub total_difficulty: String,
    #[serde(deserialize_with = "null_default")]
    pub transactions_count: u32,
    #[serde(deserialize_with = "null_default")]
    pub transactions: Vec<Transaction>,
    #[serde(deserialize_with = "null_default")]
    pub uncles: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetBlocksResponse {
    #[serde(deserialize_with = "null_default")]
    pub blocks: Vec<Block>,
}

impl GetBlocksRequest {
    /// Blocks from `from_block` to `to_block` on `blockchain`, inclusive.
    pub fn new(blockchain: Chain, from_block: BlockRef, to_block: BlockRef) -> Self {
        Self {
            blockchain,
            from_block: Some(from_block),
            to_block: Some(to_block),
            desc_order: None,
            include_txs: None,
            include_logs: None,
            decode_logs: None,
            decode_tx_data: None,
        }
    }
}

impl ApiRequest for GetBlocksRequest {
    const METHOD: &'static str = "ankr_getBlocks";
    type Response = GetBlocksResponse;

    fn with_defaults(mut self) -> Result<Self, CoreError> {
        default_flag(&mut self.desc_order, true);
        default_flag(&mut self.include_txs, true);
        Ok(self)
    }
}

// ==============================================================================
// Logs
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLogsRequest {
    /// Emitting contracts; any contract when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<Chain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_timestamp: Option<u64>,
    /// Positional topic filters; each slot matches any of its values.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc_order: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_logs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventInput {
    #[serde(deserialize_with = "null_default")]
    pub indexed: bool,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub size: u32,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_default")]
    pub value_decoded: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    #[serde(deserialize_with = "null_default")]
    pub anonymous: bool,
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub inputs: Vec<EventInput>,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub signature: String,
    /// Human-readable rendering of the decoded event.
    #[serde(rename = "string")]
    #[serde(deserialize_with = "null_default")]
    pub text: String,
    #[serde(deserialize_with = "null_default")]
    pub verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Log {
    #[serde(deserialize_with = "null_default")]
    pub address: String,
    #[serde(deserialize_with = "null_default")]
    pub block_hash: String,
    #[serde(deserialize_with = "null_default")]
    pub block_number: String,
    #[serde(deserialize_with = "null_default")]
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
    #[serde(deserialize_with = "null_default")]
    pub log_index: String,
    #[serde(deserialize_with = "null_default")]
    pub removed: bool,
    #[serde(deserialize_with = "null_default")]
    pub topics: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub transaction_hash: String,
    #[serde(deserialize_with = "null_default")]
    pub transaction_index: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetLogsResponse {
    #[serde(deserialize_with = "null_default")]
    pub logs: Vec<Log>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl ApiRequest for GetLogsRequest {
    const METHOD: &'static str = "ankr_getLogs";
    type Response = GetLogsResponse;

    fn with_defaults(mut self) -> Result<Self, CoreError> {
        default_flag(&mut self.desc_order, true);
        clear_zero_page_size(&mut self.page_size);
        Ok(self)
    }
}

paginated!(GetLogsRequest => GetLogsResponse);

// ==============================================================================
// Transactions
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MethodInput {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub size: u32,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_default")]
    pub value_decoded: String,
}

/// Decoded contract call carried by a transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Method {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub inputs: Vec<MethodInput>,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub signature: String,
    #[serde(rename = "string")]
    #[serde(deserialize_with = "null_default")]
    pub text: String,
    #[serde(deserialize_with = "null_default")]
    pub verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    #[serde(deserialize_with = "null_default")]
    pub block_hash: String,
    #[serde(deserialize_with = "null_default")]
    pub block_number: String,
    #[serde(deserialize_with = "null_default")]
    pub blockchain: String,
    #[serde(deserialize_with = "null_default")]
    pub contract_address: String,
    #[serde(deserialize_with = "null_default")]
    pub cumulative_gas_used: String,
    #[serde(deserialize_with = "null_default")]
    pub from: String,
    #[serde(deserialize_with = "null_default")]
    pub gas: String,
    #[serde(deserialize_with = "null_default")]
    pub gas_price: String,
    #[serde(deserialize_with = "null_default")]
    pub gas_used: String,
    #[serde(deserialize_with = "null_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_default")]
    pub input: String,
    #[serde(deserialize_with = "null_default")]
    pub logs: Vec<Log>,
    #[serde(deserialize_with = "null_default")]
    pub logs_bloom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
    #[serde(deserialize_with = "null_default")]
    pub nonce: String,
    #[serde(deserialize_with = "null_default")]
    pub r: String,
    #[serde(deserialize_with = "null_default")]
    pub s: String,
    #[serde(deserialize_with = "null_default")]
    pub v: String,
    #[serde(deserialize_with = "null_default")]
    pub status: String,
    #[serde(deserialize_with = "null_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "null_default")]
    pub to: String,
    #[serde(deserialize_with = "null_default")]
    pub transaction_hash: String,
    #[serde(deserialize_with = "null_default")]
    pub transaction_index: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_default")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionsByHashRequest {
    /// Searched on every chain when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<Chain>,
    pub transaction_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_logs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_logs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_tx_data: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetTransactionsByHashResponse {
    #[serde(deserialize_with = "null_default")]
    pub transactions: Vec<Transaction>,
}

impl ApiRequest for GetTransactionsByHashRequest {
    const METHOD: &'static str = "ankr_getTransactionsByHash";
    type Response = GetTransactionsByHashResponse;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionsByAddressRequest {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<Chain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_logs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc_order: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetTransactionsByAddressResponse {
    #[serde(deserialize_with = "null_default")]
    pub transactions: Vec<Transaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl ApiRequest for GetTransactionsByAddressRequest {
    const METHOD: &'static str = "ankr_getTransactionsByAddress";
    type Response = GetTransactionsByAddressResponse;

    fn with_defaults(mut self) -> Result<Self, CoreError> {
        default_flag(&mut self.desc_order, true);
        clear_zero_page_size(&mut self.page_size);
        Ok(self)
    }
}

paginated!(GetTransactionsByAddressRequest => GetTransactionsByAddressResponse);

// ==============================================================================
// Interactions
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetInteractionsRequest {
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetInteractionsResponse {
    /// Chains on which the address has any activity.
    #[serde(deserialize_with = "null_default")]
    pub blockchains: Vec<String>,
}

impl ApiRequest for GetInteractionsRequest {
    const METHOD: &'static str = "ankr_getInteractions";
    type Response = GetInteractionsResponse;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn blocks_default_to_descending_with_transactions() {
        let request = GetBlocksRequest {
            include_logs: Some(false),
            ..GetBlocksRequest::new(Chain::Ethereum, BlockRef::from(100), BlockRef::from(101))
        }
        .with_defaults()
        .expect("defaults apply");

        assert_eq!(
            serde_json::to_value(&request).expect("encodes"),
            json!({
                "blockchain": "eth",
                "fromBlock": 100,
                "toBlock": 101,
                "descOrder": true,
                "includeTxs": true,
                "includeLogs": false,
            })
        );
    }

    #[test]
    fn blocks_always_send_their_chain() {
        let request = GetBlocksRequest::new(Chain::Base, BlockRef::latest(), BlockRef::latest())
            .with_defaults()
            .expect("a chain-bound request is always valid");
        let params = serde_json::to_value(&request).expect("encodes");
        assert_eq!(params["blockchain"], "base");
        assert_eq!(params["fromBlock"], "latest");
    }

    #[test]
    fn explicit_ascending_order_is_respected() {
        let request = GetLogsRequest {
            desc_order: Some(false),
            page_size: Some(0),
            ..Default::default()
        }
        .with_defaults()
        .expect("defaults apply");

        assert_eq!(request.desc_order, Some(false));
        assert_eq!(request.page_size, None);
    }

    #[test]
    fn log_topics_serialize_as_nested_arrays() {
        let request = GetLogsRequest {
            blockchain: Some(Chain::Polygon),
            topics: vec![vec!["0xddf2".to_owned()], vec![]],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).expect("encodes"),
            json!({ "blockchain": "polygon", "topics": [["0xddf2"], []] })
        );
    }

    #[test]
    fn transactions_by_address_defaults_order_only() {
        let request = GetTransactionsByAddressRequest {
            address: "0xabc".to_owned(),
            ..Default::default()
        }
        .with_defaults()
        .expect("defaults apply");
        assert_eq!(
            serde_json::to_value(&request).expect("encodes"),
            json!({ "address": "0xabc", "descOrder": true })
        );
    }

    #[test]
    fn stats_without_chain_send_empty_params() {
        let request = GetBlockchainStatsRequest::default();
        assert_eq!(serde_json::to_value(&request).expect("encodes"), json!({}));
    }

    #[test]
    fn block_decodes_renamed_fields_and_nested_transactions() {
        let block: Block = serde_json::from_value(json!({
            "hash": "0xb10c",
            "number": "0x10",
            "blockchain": "eth",
            "transactionsCount": 1,
            "details": { "ethBlock": { "gasLimit": 30000000, "miner": "0xm" } },
            "transactions": [{
                "hash": "0x7a",
                "type": "0x2",
                "method": { "name": "transfer", "string": "transfer(address,uint256)" }
            }]
        }))
        .expect("decodes");

        assert_eq!(block.block_hash, "0xb10c");
        assert_eq!(block.block_height, "0x10");
        assert_eq!(block.blockchain_name, "eth");
        assert_eq!(
            block.details.eth_block.as_ref().map(|d| d.gas_limit),
            Some(30_000_000)
        );
        let tx = &block.transactions[0];
        assert_eq!(tx.kind, "0x2");
        assert_eq!(
            tx.method.as_ref().map(|m| m.text.as_str()),
            Some("transfer(address,uint256)")
        );
    }
}
