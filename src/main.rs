use collectooor_fund::VERSION;
use collectooor_fund::app::AppState;
use collectooor_fund::app_dir::{
    copy_env_file_if_not_exists, create_app_user_data_directory_if_not_exists,
};
use collectooor_fund::config::Config;
use collectooor_fund::context::AppContext;
use collectooor_fund::logging::initialize_logger;
use std::process::ExitCode;

fn main() -> ExitCode {
    let app_data_dir = match create_app_user_data_directory_if_not_exists() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to create app user_data directory: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = initialize_logger(&app_data_dir) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    match copy_env_file_if_not_exists(&app_data_dir) {
        Ok(true) => tracing::info!("Copied .env.example into {}", app_data_dir.display()),
        Ok(false) => {}
        Err(e) => tracing::warn!("Failed to copy .env.example: {}", e),
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let app_context = match AppContext::new(config) {
        Ok(context) => context,
        Err(e) => {
            tracing::error!("Failed to initialize: {}", e);
            eprintln!("Failed to initialize: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize the Tokio runtime
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("multi-threading runtime cannot be initialized: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Run the native application
    let result = runtime.block_on(async {
        let native_options = eframe::NativeOptions {
            persist_window: true, // Persist window size and position
            centered: true,       // Center window on startup if not maximized
            persistence_path: Some(app_data_dir.join("app.ron")),
            ..Default::default()
        };
        eframe::run_native(
            &format!("Collectooorr Mek v{}", VERSION),
            native_options,
            Box::new(move |cc| {
                Ok(Box::new(
                    AppState::new(cc.egui_ctx.clone(), app_context)
                        .with_storage(&cc.egui_ctx, cc.storage),
                ))
            }),
        )
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Application error: {}", e);
            eprintln!("Application error: {}", e);
            ExitCode::FAILURE
        }
    }
}
