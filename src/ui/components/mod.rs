pub mod amount_input;
pub mod component_trait;
pub mod nft_grid;
pub mod styled;
pub mod top_panel;

// Re-export the main traits for easy access
pub use component_trait::{Component, ComponentResponse};
