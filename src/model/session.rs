use crate::model::address::Address;

/// An authenticated wallet session.
///
/// Exists only between a successful `authenticate` and the next `logout`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    account: Address,
}

impl Session {
    pub fn new(account: Address) -> Self {
        Self { account }
    }

    /// Account the wallet authorized; donations are sent from it.
    pub fn account(&self) -> &Address {
        &self.account
    }
}
