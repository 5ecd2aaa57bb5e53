//! Access to the user's external wallet.
//!
//! The wallet owns the keys and the approval popups; this module only asks it for
//! accounts and for signing and broadcasting transactions.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::model::address::Address;
use crate::model::amount::TokenAmount;
use crate::model::transfer::TransferError;

/// EIP-1193 "User Rejected Request".
const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("Request was rejected in the wallet")]
    UserRejected,
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("Wallet is unreachable: {0}")]
    Transport(String),
    #[error("Wallet error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Malformed wallet response: {0}")]
    InvalidResponse(String),
    #[error("Wallet did not authorize any account")]
    NoAccounts,
}

impl From<WalletError> for TransferError {
    fn from(error: WalletError) -> Self {
        match error {
            WalletError::UserRejected => TransferError::UserRejected,
            WalletError::InsufficientFunds(_) => TransferError::InsufficientFunds,
            WalletError::Transport(message) => TransferError::NetworkError(message),
            other => TransferError::Unknown(other.to_string()),
        }
    }
}

/// A native-asset transaction as handed to the wallet for signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionParams {
    pub from: Address,
    pub to: Address,
    pub value: TokenAmount,
    /// The wallet refuses to sign when it is connected to a different chain.
    pub chain_id: u64,
}

impl TransactionParams {
    /// `eth_sendTransaction` parameter object; quantities are 0x-prefixed hex.
    pub fn to_rpc_json(&self) -> Value {
        json!({
            "from": self.from.to_string(),
            "to": self.to.to_string(),
            "value": format!("{:#x}", self.value),
            "chainId": format!("{:#x}", self.chain_id),
        })
    }
}

#[async_trait]
pub trait WalletProvider: Send + Sync + Debug {
    /// Asks the wallet to authorize this application. Suspends until the user
    /// approves or rejects.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Signs and broadcasts a transaction, returning its hash.
    async fn send_transaction(&self, tx: &TransactionParams) -> Result<String, WalletError>;
}

/// Wallet provider speaking JSON-RPC over HTTP to a local wallet endpoint.
#[derive(Debug)]
pub struct JsonRpcWalletProvider {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    #[serde(default)]
    message: String,
}

impl JsonRpcWalletProvider {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, WalletError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WalletError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        tracing::debug!(method, id, "sending wallet request");

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(WalletError::Transport(format!("HTTP {}: {}", status, text)));
        }

        let rpc_response: RpcResponse = response
            .json()
            .await
            .map_err(|e| WalletError::InvalidResponse(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(classify_rpc_error(error.code, error.message));
        }
        rpc_response
            .result
            .ok_or_else(|| WalletError::InvalidResponse(format!("{} returned no result", method)))
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let result = self.call("eth_requestAccounts", json!([])).await?;
        decode_accounts(result)
    }

    async fn send_transaction(&self, tx: &TransactionParams) -> Result<String, WalletError> {
        let result = self
            .call("eth_sendTransaction", json!([tx.to_rpc_json()]))
            .await?;
        match result {
            Value::String(hash) => Ok(hash),
            other => Err(WalletError::InvalidResponse(format!(
                "expected a transaction hash, got {}",
                other
            ))),
        }
    }
}

fn classify_rpc_error(code: i64, message: String) -> WalletError {
    if code == USER_REJECTED_CODE {
        WalletError::UserRejected
    } else if message.to_ascii_lowercase().contains("insufficient funds") {
        WalletError::InsufficientFunds(message)
    } else {
        WalletError::Rpc { code, message }
    }
}

fn decode_accounts(result: Value) -> Result<Vec<Address>, WalletError> {
    let accounts: Vec<String> = serde_json::from_value(result)
        .map_err(|e| WalletError::InvalidResponse(e.to_string()))?;
    accounts
        .iter()
        .map(|account| {
            account
                .parse()
                .map_err(|e: crate::model::address::AddressError| {
                    WalletError::InvalidResponse(e.to_string())
                })
        })
        .collect()
}
