pub mod address;
pub mod amount;
pub mod chain;
pub mod nft;
pub mod query;
pub mod session;
pub mod transfer;
