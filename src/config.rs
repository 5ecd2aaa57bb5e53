use std::time::Duration;

use serde::Deserialize;

use crate::app_dir::app_user_data_file_path;
use crate::model::address::Address;
use crate::model::chain::Chain;

/// Application settings, read from the `.env` file in the app data directory and
/// from the process environment. Variable names are the upper-cased field names.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the indexing service
    #[serde(default = "default_indexer_api_url")]
    pub indexer_api_url: String,
    /// API key sent with every indexer request
    pub indexer_api_key: String,
    /// JSON-RPC endpoint of the user's wallet
    #[serde(default = "default_wallet_rpc_url")]
    pub wallet_rpc_url: String,
    /// Chain queried for balances and NFTs
    #[serde(default = "default_chain")]
    pub chain: Chain,
    /// The fund's on-chain account; donations go here
    #[serde(default = "default_fund_address")]
    pub fund_address: Address,
    /// Only NFTs of this contract are shown
    #[serde(default = "default_collection_name")]
    pub collection_name: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0}")]
    LoadError(String),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] envy::Error),
}

fn default_indexer_api_url() -> String {
    "https://deep-index.moralis.io/api/v2".to_string()
}

fn default_wallet_rpc_url() -> String {
    "http://127.0.0.1:1248".to_string()
}

fn default_chain() -> Chain {
    Chain::Ropsten
}

fn default_fund_address() -> Address {
    Address::new([
        0x2c, 0xab, 0x92, 0xc1, 0xe9, 0xd2, 0xa7, 0x01, 0xca, 0x04, 0x11, 0xb0, 0xff, 0x35, 0xa0,
        0x90, 0x7c, 0xa3, 0x1f, 0x7f,
    ])
}

fn default_collection_name() -> String {
    "Art Blocks".to_string()
}

fn default_image_base_url() -> String {
    "https://api.artblocks.io/image".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Loads the configuration from the `.env` file and environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let env_file_path =
            app_user_data_file_path(".env").map_err(|e| ConfigError::LoadError(e.to_string()))?;
        if let Err(err) = dotenvy::from_path_override(&env_file_path) {
            tracing::warn!(
                ?err,
                "Failed to load .env file. Continuing with environment variables."
            );
        } else {
            tracing::info!("Successfully loaded .env file");
        }

        let config = envy::from_env::<Config>()?;
        config.log_loaded();
        Ok(config)
    }

    /// Builds a configuration from explicit key/value pairs instead of the environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, Config>(vars)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn log_loaded(&self) {
        tracing::info!(
            chain = self.chain.as_str(),
            fund = %self.fund_address,
            indexer = %self.indexer_api_url,
            wallet = %self.wallet_rpc_url,
            "Configuration loaded"
        );
    }
}
