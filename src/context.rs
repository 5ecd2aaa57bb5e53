use crate::components::transfer_submitter::TransferSubmitter;
use crate::components::wallet_connector::WalletConnector;
use crate::config::Config;
use crate::indexer::{ChainDataReader, IndexerClient, IndexerError};
use crate::model::address::Address;
use crate::model::chain::Chain;
use crate::wallet_provider::{JsonRpcWalletProvider, WalletError, WalletProvider};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("Failed to create indexer client: {0}")]
    Indexer(#[from] IndexerError),
    #[error("Failed to create wallet client: {0}")]
    Wallet(#[from] WalletError),
}

/// Everything screens and backend tasks share: settings, remote clients, and the
/// single wallet session and transfer submitter of this process.
#[derive(Debug)]
pub struct AppContext {
    pub(crate) config: Config,
    pub(crate) indexer: Arc<dyn ChainDataReader>,
    pub(crate) wallet: WalletConnector,
    pub(crate) transfer_submitter: Arc<TransferSubmitter>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Arc<Self>, ContextError> {
        let timeout = config.request_timeout();
        let indexer = IndexerClient::new(&config.indexer_api_url, &config.indexer_api_key, timeout)?;
        let wallet_provider = JsonRpcWalletProvider::new(&config.wallet_rpc_url, timeout)?;
        Ok(Self::with_providers(
            config,
            Arc::new(indexer),
            Arc::new(wallet_provider),
        ))
    }

    /// Builds a context around already constructed clients.
    pub fn with_providers(
        config: Config,
        indexer: Arc<dyn ChainDataReader>,
        wallet_provider: Arc<dyn WalletProvider>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            indexer,
            wallet: WalletConnector::new(wallet_provider),
            transfer_submitter: Arc::new(TransferSubmitter::new()),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fund_address(&self) -> Address {
        self.config.fund_address
    }

    pub fn chain(&self) -> Chain {
        self.config.chain
    }

    pub fn wallet(&self) -> &WalletConnector {
        &self.wallet
    }

    pub fn transfer_submitter(&self) -> &Arc<TransferSubmitter> {
        &self.transfer_submitter
    }
}
