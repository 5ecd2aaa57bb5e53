use crate::backend_task::{BackendTaskSuccessResult, TaskError};
use crate::context::AppContext;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum WalletTask {
    Authenticate,
}

impl AppContext {
    pub async fn run_wallet_task(
        self: &Arc<Self>,
        task: WalletTask,
    ) -> Result<BackendTaskSuccessResult, TaskError> {
        match task {
            WalletTask::Authenticate => self
                .wallet
                .authenticate()
                .await
                .map(BackendTaskSuccessResult::Authenticated)
                .map_err(|e| {
                    tracing::warn!(error = %e, "wallet authentication failed");
                    TaskError::Authentication(e)
                }),
        }
    }
}
