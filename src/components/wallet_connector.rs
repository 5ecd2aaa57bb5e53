use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::session::Session;
use crate::wallet_provider::{WalletError, WalletProvider};

/// Holds the process-wide wallet session.
///
/// Lives in the `AppContext`, so every screen and backend task observes the same
/// authentication state without re-authenticating.
#[derive(Debug)]
pub struct WalletConnector {
    provider: Arc<dyn WalletProvider>,
    session: RwLock<Option<Session>>,
}

impl WalletConnector {
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            provider,
            session: RwLock::new(None),
        }
    }

    /// Suspends until the user approves or rejects the connection in the wallet.
    pub async fn authenticate(&self) -> Result<Session, WalletError> {
        let accounts = self.provider.request_accounts().await?;
        let account = accounts.into_iter().next().ok_or(WalletError::NoAccounts)?;

        let session = Session::new(account);
        *self.write_session() = Some(session.clone());
        tracing::info!(account = %session.account(), "wallet authenticated");
        Ok(session)
    }

    pub fn logout(&self) {
        if let Some(session) = self.write_session().take() {
            tracing::info!(account = %session.account(), "wallet disconnected");
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.read_session().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_session().is_some()
    }

    pub fn provider(&self) -> &Arc<dyn WalletProvider> {
        &self.provider
    }

    // the session is a plain value, so a panic elsewhere cannot leave it half-written
    fn read_session(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.session.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_session(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
