pub mod app;
pub mod app_dir;
pub mod backend_task;
pub mod components;
pub mod config;
pub mod context;
pub mod indexer;
pub mod logging;
pub mod model;
pub mod ui;
pub mod utils;
pub mod wallet_provider;

/// Version of this build, shown in the window title.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
