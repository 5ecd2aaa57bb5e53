use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::components::wallet_connector::WalletConnector;
use crate::model::address::Address;
use crate::model::transfer::{TransferError, TransferRequest, TransferStatus};
use crate::wallet_provider::{TransactionParams, WalletProvider};

/// Submits donations through the connected wallet, one at a time.
///
/// A submission is claimed synchronously with [TransferSubmitter::begin] and completed
/// asynchronously with [PendingTransfer::submit]. While a claim exists every other
/// `begin` fails with [TransferError::AlreadyPending].
#[derive(Debug, Default)]
pub struct TransferSubmitter {
    pending: AtomicBool,
    last_error: Mutex<Option<TransferError>>,
}

/// A claimed submission slot. Dropping it, submitted or not, clears `pending`.
#[derive(Debug)]
pub struct PendingTransfer {
    submitter: Arc<TransferSubmitter>,
    from: Address,
    request: TransferRequest,
}

impl TransferSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> TransferStatus {
        TransferStatus {
            pending: self.is_pending(),
            error: self.lock_error().clone(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Claims the submission slot for `request`.
    ///
    /// Fails with `Unauthenticated` when there is no wallet session and with
    /// `AlreadyPending` when another submission is in flight. Neither contacts the
    /// wallet.
    pub fn begin(
        self: &Arc<Self>,
        wallet: &WalletConnector,
        request: TransferRequest,
    ) -> Result<PendingTransfer, TransferError> {
        let Some(session) = wallet.session() else {
            *self.lock_error() = Some(TransferError::Unauthenticated);
            return Err(TransferError::Unauthenticated);
        };

        if self
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            // the in-flight submission keeps its own status
            return Err(TransferError::AlreadyPending);
        }
        *self.lock_error() = None;

        Ok(PendingTransfer {
            submitter: Arc::clone(self),
            from: *session.account(),
            request,
        })
    }

    /// Claims the slot and submits in one go.
    pub async fn submit(
        self: &Arc<Self>,
        wallet: &WalletConnector,
        request: TransferRequest,
    ) -> Result<String, TransferError> {
        let pending = self.begin(wallet, request)?;
        pending.submit(wallet.provider().as_ref()).await
    }

    fn lock_error(&self) -> std::sync::MutexGuard<'_, Option<TransferError>> {
        self.last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PendingTransfer {
    pub fn request(&self) -> &TransferRequest {
        &self.request
    }

    /// Hands the transaction to the wallet and waits for its hash.
    ///
    /// The outcome is recorded on the submitter before `pending` is cleared.
    pub async fn submit(self, provider: &dyn WalletProvider) -> Result<String, TransferError> {
        let tx = TransactionParams {
            from: self.from,
            to: *self.request.receiver(),
            value: self.request.amount_wei(),
            chain_id: self.request.chain().chain_id(),
        };
        tracing::info!(
            from = %tx.from,
            to = %tx.to,
            amount = %self.request.amount(),
            "submitting donation"
        );

        let result = provider
            .send_transaction(&tx)
            .await
            .map_err(TransferError::from);

        match &result {
            Ok(tx_hash) => tracing::info!(%tx_hash, "donation submitted"),
            Err(error) => tracing::warn!(%error, "donation failed"),
        }
        *self.submitter.lock_error() = result.as_ref().err().cloned();
        result
    }
}

impl Drop for PendingTransfer {
    fn drop(&mut self) {
        self.submitter.pending.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::chain::Chain;
    use crate::utils::test_providers::{MockWallet, fund_address};
    use crate::wallet_provider::WalletError;

    fn donation(amount: &str) -> TransferRequest {
        TransferRequest::build(amount, Chain::Ropsten, fund_address()).unwrap()
    }

    async fn connected(wallet: MockWallet) -> (Arc<MockWallet>, WalletConnector) {
        let wallet = Arc::new(wallet);
        let connector = WalletConnector::new(wallet.clone());
        connector.authenticate().await.unwrap();
        (wallet, connector)
    }

    #[tokio::test]
    async fn test_unauthenticated_submit_never_reaches_wallet() {
        let wallet = Arc::new(MockWallet::approving());
        let connector = WalletConnector::new(wallet.clone());
        let submitter = Arc::new(TransferSubmitter::new());

        let result = submitter.submit(&connector, donation("0.5")).await;

        assert_eq!(result, Err(TransferError::Unauthenticated));
        assert_eq!(wallet.sent_transactions().len(), 0);
        let status = submitter.status();
        assert!(!status.pending);
        assert_eq!(status.error, Some(TransferError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_successful_submit_clears_pending_without_error() {
        let (wallet, connector) = connected(MockWallet::gated()).await;
        let submitter = Arc::new(TransferSubmitter::new());

        let pending = submitter.begin(&connector, donation("0.5")).unwrap();
        assert!(submitter.status().pending);

        let provider = wallet.clone();
        let task = tokio::spawn(async move { pending.submit(provider.as_ref()).await });
        wallet.release();
        let tx_hash = task.await.unwrap().unwrap();

        assert_eq!(tx_hash, MockWallet::TX_HASH);
        assert_eq!(submitter.status(), TransferStatus::default());

        let sent = wallet.sent_transactions();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].value, 500_000_000_000_000_000);
        assert_eq!(sent[0].to, fund_address());
    }

    #[tokio::test]
    async fn test_user_rejection_is_reported() {
        let (_wallet, connector) =
            connected(MockWallet::approving().failing_send(WalletError::UserRejected)).await;
        let submitter = Arc::new(TransferSubmitter::new());

        let pending = submitter.begin(&connector, donation("1")).unwrap();
        assert!(submitter.is_pending());
        let result = pending.submit(connector.provider().as_ref()).await;

        assert_eq!(result, Err(TransferError::UserRejected));
        let status = submitter.status();
        assert!(!status.pending);
        assert_eq!(status.error, Some(TransferError::UserRejected));
    }

    #[tokio::test]
    async fn test_second_submit_while_pending_is_rejected() {
        let (wallet, connector) = connected(MockWallet::gated()).await;
        let submitter = Arc::new(TransferSubmitter::new());

        let first = submitter.begin(&connector, donation("0.1")).unwrap();
        assert_eq!(
            submitter.begin(&connector, donation("0.2")).unwrap_err(),
            TransferError::AlreadyPending
        );
        // the rejected duplicate does not touch the in-flight status
        assert_eq!(submitter.status().error, None);
        assert!(submitter.is_pending());

        wallet.release();
        first.submit(wallet.as_ref()).await.unwrap();
        assert_eq!(wallet.sent_transactions().len(), 1);

        // once settled, a new donation is accepted again
        assert!(submitter.begin(&connector, donation("0.2")).is_ok());
    }

    #[tokio::test]
    async fn test_dropped_claim_releases_the_slot() {
        let (_wallet, connector) = connected(MockWallet::approving()).await;
        let submitter = Arc::new(TransferSubmitter::new());

        let claim = submitter.begin(&connector, donation("0.1")).unwrap();
        drop(claim);

        assert!(!submitter.is_pending());
        assert!(submitter.begin(&connector, donation("0.1")).is_ok());
    }

    #[tokio::test]
    async fn test_network_and_funds_errors_are_kept_for_display() {
        let (_wallet, connector) = connected(
            MockWallet::approving()
                .failing_send(WalletError::InsufficientFunds("balance 0".into())),
        )
        .await;
        let submitter = Arc::new(TransferSubmitter::new());

        let result = submitter.submit(&connector, donation("5")).await;
        assert_eq!(result, Err(TransferError::InsufficientFunds));

        let (_wallet, connector) = connected(
            MockWallet::approving().failing_send(WalletError::Transport("timed out".into())),
        )
        .await;
        let result = submitter.submit(&connector, donation("5")).await;
        assert_eq!(
            result,
            Err(TransferError::NetworkError("timed out".to_string()))
        );
        assert_eq!(
            submitter.status().error,
            Some(TransferError::NetworkError("timed out".to_string()))
        );
    }
}
