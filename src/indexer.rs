//! Client for the hosted indexing service that serves balances and NFT holdings.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::model::address::Address;
use crate::model::amount::{Amount, TokenAmount};
use crate::model::chain::Chain;
use crate::model::nft::NftPage;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexerError {
    #[error("Indexer request failed: {0}")]
    Transport(String),
    #[error("Indexer returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed indexer response: {0}")]
    Decode(String),
}

/// Read access to on-chain data of an address.
///
/// Each call is a one-shot request; retrying is up to the caller.
#[async_trait]
pub trait ChainDataReader: Send + Sync + std::fmt::Debug {
    async fn get_native_balance(&self, address: &Address, chain: Chain)
    -> Result<Amount, IndexerError>;

    async fn get_nfts(&self, address: &Address, chain: Chain) -> Result<NftPage, IndexerError>;
}

#[derive(Debug, Deserialize)]
struct NativeBalanceResponse {
    balance: String,
}

impl NativeBalanceResponse {
    fn into_amount(self, chain: Chain) -> Result<Amount, IndexerError> {
        let wei = self
            .balance
            .trim()
            .parse::<TokenAmount>()
            .map_err(|e| IndexerError::Decode(format!("balance {:?}: {}", self.balance, e)))?;
        Ok(Amount::native(wei, chain))
    }
}

#[derive(Debug)]
pub struct IndexerClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IndexerClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, IndexerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IndexerError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, IndexerError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, ?query, "querying indexer");

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| IndexerError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(IndexerError::Status { status, body });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| IndexerError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ChainDataReader for IndexerClient {
    async fn get_native_balance(
        &self,
        address: &Address,
        chain: Chain,
    ) -> Result<Amount, IndexerError> {
        let response: NativeBalanceResponse = self
            .get(
                &format!("{}/balance", address),
                &[("chain", chain.as_str())],
            )
            .await?;
        response.into_amount(chain)
    }

    async fn get_nfts(&self, address: &Address, chain: Chain) -> Result<NftPage, IndexerError> {
        self.get(
            &format!("{}/nft", address),
            &[("chain", chain.as_str()), ("format", "decimal")],
        )
        .await
    }
}
