use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ==============================================================================
// Chain
// ==============================================================================

/// Blockchain networks served by the multichain endpoint, by wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    #[serde(rename = "arbitrum")]
    Arbitrum,
    #[serde(rename = "avalanche")]
    Avalanche,
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "bsc")]
    Bsc,
    #[serde(rename = "eth")]
    Ethereum,
    #[serde(rename = "fantom")]
    Fantom,
    #[serde(rename = "flare")]
    Flare,
    #[serde(rename = "gnosis")]
    Gnosis,
    #[serde(rename = "linea")]
    Linea,
    #[serde(rename = "optimism")]
    Optimism,
    #[serde(rename = "polygon")]
    Polygon,
    #[serde(rename = "polygon_zkevm")]
    PolygonZkEvm,
    #[serde(rename = "scroll")]
    Scroll,
    #[serde(rename = "stellar")]
    Stellar,
    #[serde(rename = "story_mainnet")]
    Story,
    #[serde(rename = "syscoin")]
    Syscoin,
    #[serde(rename = "telos")]
    Telos,
    #[serde(rename = "xai")]
    Xai,
    #[serde(rename = "xlayer")]
    XLayer,

    #[serde(rename = "avalanche_fuji")]
    AvalancheFuji,
    #[serde(rename = "base_sepolia")]
    BaseSepolia,
    #[serde(rename = "eth_holesky")]
    EthereumHolesky,
    #[serde(rename = "eth_sepolia")]
    EthereumSepolia,
    #[serde(rename = "optimism_testnet")]
    OptimismTestnet,
    #[serde(rename = "polygon_amoy")]
    PolygonAmoy,
    #[serde(rename = "story_aeneid_testnet")]
    StoryTestnet,
}

impl Chain {
    pub const ALL: [Chain; 26] = [
        Chain::Arbitrum,
        Chain::Avalanche,
        Chain::Base,
        Chain::Bsc,
        Chain::Ethereum,
        Chain::Fantom,
        Chain::Flare,
        Chain::Gnosis,
        Chain::Linea,
        Chain::Optimism,
        Chain::Polygon,
        Chain::PolygonZkEvm,
        Chain::Scroll,
        Chain::Stellar,
        Chain::Story,
        Chain::Syscoin,
        Chain::Telos,
        Chain::Xai,
        Chain::XLayer,
        Chain::AvalancheFuji,
        Chain::BaseSepolia,
        Chain::EthereumHolesky,
        Chain::EthereumSepolia,
        Chain::OptimismTestnet,
        Chain::PolygonAmoy,
        Chain::StoryTestnet,
    ];

    /// The identifier used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arbitrum => "arbitrum",
            Self::Avalanche => "avalanche",
            Self::Base => "base",
            Self::Bsc => "bsc",
            Self::Ethereum => "eth",
            Self::Fantom => "fantom",
            Self::Flare => "flare",
            Self::Gnosis => "gnosis",
            Self::Linea => "linea",
            Self::Optimism => "optimism",
            Self::Polygon => "polygon",
            Self::PolygonZkEvm => "polygon_zkevm",
            Self::Scroll => "scroll",
            Self::Stellar => "stellar",
            Self::Story => "story_mainnet",
            Self::Syscoin => "syscoin",
            Self::Telos => "telos",
            Self::Xai => "xai",
            Self::XLayer => "xlayer",
            Self::AvalancheFuji => "avalanche_fuji",
            Self::BaseSepolia => "base_sepolia",
            Self::EthereumHolesky => "eth_holesky",
            Self::EthereumSepolia => "eth_sepolia",
            Self::OptimismTestnet => "optimism_testnet",
            Self::PolygonAmoy => "polygon_amoy",
            Self::StoryTestnet => "story_aeneid_testnet",
        }
    }

    pub const fn is_testnet(self) -> bool {
        matches!(
            self,
            Self::AvalancheFuji
                | Self::BaseSepolia
                | Self::EthereumHolesky
                | Self::EthereumSepolia
                | Self::OptimismTestnet
                | Self::PolygonAmoy
                | Self::StoryTestnet
        )
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chain `{0}`")]
pub struct ParseChainError(String);

impl FromStr for Chain {
    type Err = ParseChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|chain| chain.as_str() == s)
            .ok_or_else(|| ParseChainError(s.to_owned()))
    }
}

// ==============================================================================
// Block Reference
// ==============================================================================

/// A block bound: an explicit height or a tag such as `"latest"`,
/// `"earliest"` or a hex number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockRef {
    Number(u64),
    Tag(String),
}

impl BlockRef {
    pub fn latest() -> Self {
        Self::Tag("latest".to_owned())
    }

    pub fn earliest() -> Self {
        Self::Tag("earliest".to_owned())
    }
}

impl From<u64> for BlockRef {
    fn from(height: u64) -> Self {
        Self::Number(height)
    }
}

impl From<&str> for BlockRef {
    fn from(tag: &str) -> Self {
        Self::Tag(tag.to_owned())
    }
}
