use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Chains the indexing service can be queried on.
///
/// The lowercase name is what the indexing service expects in its `chain` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    #[serde(alias = "mainnet", alias = "ethereum")]
    Eth,
    Ropsten,
    Rinkeby,
    Goerli,
    Sepolia,
    Polygon,
    Bsc,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported chain: {0}")]
pub struct UnsupportedChain(pub String);

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Eth => "eth",
            Chain::Ropsten => "ropsten",
            Chain::Rinkeby => "rinkeby",
            Chain::Goerli => "goerli",
            Chain::Sepolia => "sepolia",
            Chain::Polygon => "polygon",
            Chain::Bsc => "bsc",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Chain::Eth => 1,
            Chain::Ropsten => 3,
            Chain::Rinkeby => 4,
            Chain::Goerli => 5,
            Chain::Sepolia => 11155111,
            Chain::Polygon => 137,
            Chain::Bsc => 56,
        }
    }

    /// Symbol of the chain's native asset. All of them use 18 decimals.
    pub fn native_symbol(&self) -> &'static str {
        match self {
            Chain::Polygon => "MATIC",
            Chain::Bsc => "BNB",
            _ => "ETH",
        }
    }

    pub fn is_testnet(&self) -> bool {
        matches!(
            self,
            Chain::Ropsten | Chain::Rinkeby | Chain::Goerli | Chain::Sepolia
        )
    }
}

impl FromStr for Chain {
    type Err = UnsupportedChain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eth" | "mainnet" | "ethereum" | "0x1" => Ok(Chain::Eth),
            "ropsten" | "0x3" => Ok(Chain::Ropsten),
            "rinkeby" | "0x4" => Ok(Chain::Rinkeby),
            "goerli" | "0x5" => Ok(Chain::Goerli),
            "sepolia" | "0xaa36a7" => Ok(Chain::Sepolia),
            "polygon" | "0x89" => Ok(Chain::Polygon),
            "bsc" | "0x38" => Ok(Chain::Bsc),
            other => Err(UnsupportedChain(other.to_string())),
        }
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
