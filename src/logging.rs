use std::panic;
use std::path::Path;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";
pub const LOG_FILE_NAME: &str = "collectooor.log";

/// Installs the global subscriber writing to `<dir>/collectooor.log`.
///
/// `RUST_LOG` overrides the default filter.
pub fn initialize_logger(dir: &Path) -> Result<(), std::io::Error> {
    let log_file = std::fs::File::create(dir.join(LOG_FILE_NAME))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(log_file)
        .with_ansi(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Global tracing subscriber already set, keeping it");
        return Ok(());
    }

    // Log panics
    let default_panic_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let payload = panic_info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown");

        let location = panic_info
            .location()
            .unwrap_or_else(|| panic::Location::caller());

        error!(
            location = tracing::field::display(location),
            "Panic occurred: {}", message
        );

        default_panic_hook(panic_info);
    }));

    tracing::info!("Logger initialized successfully");
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
