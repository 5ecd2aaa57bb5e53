pub mod transfer_submitter;
pub mod wallet_connector;
