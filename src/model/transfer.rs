use crate::model::address::Address;
use crate::model::amount::{Amount, AmountError, ETH_DECIMAL_PLACES, TokenAmount};
use crate::model::chain::Chain;

/// Why a donation could not be built or submitted.
///
/// Every variant is recoverable; the message is shown inline under the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("{0}")]
    InvalidAmount(#[from] AmountError),
    #[error("Connect your wallet to donate")]
    Unauthenticated,
    #[error("Transaction was rejected in the wallet")]
    UserRejected,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Insufficient funds to cover the donation and gas")]
    InsufficientFunds,
    #[error("A donation is already being submitted")]
    AlreadyPending,
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetType {
    #[default]
    Native,
}

/// A native-asset transfer ready to be handed to the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    amount: Amount,
    chain: Chain,
    receiver: Address,
    asset_type: AssetType,
}

impl TransferRequest {
    /// Builds a request from user input: `amount_wei = round(amount * 10^18)`.
    ///
    /// The input may end with the chain's native symbol, e.g. `"0.5 ETH"`.
    pub fn build(amount: &str, chain: Chain, receiver: Address) -> Result<Self, TransferError> {
        let parsed =
            Amount::parse_with_unit(amount, ETH_DECIMAL_PLACES, chain.native_symbol())?;
        Ok(Self::native(parsed.value(), chain, receiver))
    }

    pub fn native(amount_wei: TokenAmount, chain: Chain, receiver: Address) -> Self {
        Self {
            amount: Amount::native(amount_wei, chain),
            chain,
            receiver,
            asset_type: AssetType::Native,
        }
    }

    pub fn amount_wei(&self) -> TokenAmount {
        self.amount.value()
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn receiver(&self) -> &Address {
        &self.receiver
    }

    pub fn asset_type(&self) -> AssetType {
        self.asset_type
    }
}

/// Observable state of the transfer submitter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransferStatus {
    pub pending: bool,
    pub error: Option<TransferError>,
}
