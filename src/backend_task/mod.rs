//! Work that must not block the UI thread.
//!
//! Screens describe what they need as a [BackendTask]; the app spawns it, and the
//! outcome comes back to the visible screen as a [crate::app::TaskResult].

use crate::context::AppContext;
use crate::indexer::IndexerError;
use crate::model::amount::Amount;
use crate::model::nft::NftPage;
use crate::model::query::QueryTicket;
use crate::model::session::Session;
use crate::model::transfer::TransferError;
use crate::wallet_provider::WalletError;
use std::sync::Arc;

pub mod chain_data;
pub mod transfer;
pub mod wallet;

pub use chain_data::ChainDataTask;
pub use transfer::TransferTask;
pub use wallet::WalletTask;

#[derive(Debug)]
pub enum BackendTask {
    WalletTask(WalletTask),
    ChainDataTask(ChainDataTask),
    TransferTask(TransferTask),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendTaskSuccessResult {
    Authenticated(Session),
    NativeBalance { ticket: QueryTicket, balance: Amount },
    Nfts { ticket: QueryTicket, page: NftPage },
    TransferSubmitted { tx_hash: String },
}

/// A failed backend task. Query failures carry their ticket so the screen can tell
/// whether the failure is still relevant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskError {
    #[error("Failed to connect wallet: {0}")]
    Authentication(WalletError),
    #[error("Failed to load balance: {error}")]
    NativeBalance {
        ticket: QueryTicket,
        error: IndexerError,
    },
    #[error("Failed to load collection: {error}")]
    Nfts {
        ticket: QueryTicket,
        error: IndexerError,
    },
    #[error("{0}")]
    Transfer(TransferError),
}

impl AppContext {
    pub async fn run_backend_task(
        self: &Arc<Self>,
        task: BackendTask,
    ) -> Result<BackendTaskSuccessResult, TaskError> {
        match task {
            BackendTask::WalletTask(wallet_task) => self.run_wallet_task(wallet_task).await,
            BackendTask::ChainDataTask(chain_data_task) => {
                self.run_chain_data_task(chain_data_task).await
            }
            BackendTask::TransferTask(transfer_task) => {
                self.run_transfer_task(transfer_task).await
            }
        }
    }
}
