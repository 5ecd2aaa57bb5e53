use crate::backend_task::{BackendTaskSuccessResult, TaskError};
use crate::components::transfer_submitter::PendingTransfer;
use crate::context::AppContext;
use std::sync::Arc;

/// A donation whose submission slot was already claimed on the UI thread.
#[derive(Debug)]
pub enum TransferTask {
    Submit(PendingTransfer),
}

impl AppContext {
    pub async fn run_transfer_task(
        self: &Arc<Self>,
        task: TransferTask,
    ) -> Result<BackendTaskSuccessResult, TaskError> {
        match task {
            TransferTask::Submit(pending) => pending
                .submit(self.wallet.provider().as_ref())
                .await
                .map(|tx_hash| BackendTaskSuccessResult::TransferSubmitted { tx_hash })
                .map_err(TaskError::Transfer),
        }
    }
}
