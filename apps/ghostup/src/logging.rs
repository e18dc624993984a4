//! Tracing setup and event forwarding

use ghostup_config::Config;
use ghostup_events::AppEvent;
use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging
///
/// Debug mode (`--debug` or `RUST_LOG`) writes JSON records to a timestamped
/// file under the state directory. Otherwise only warnings reach stderr.
pub fn init_tracing(debug_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_flag;

    if !debug_enabled {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(EnvFilter::new("warn"))
            .init();
        return;
    }

    let filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,ghostup=debug,ghostup_install=debug"))
    };

    let Some(log_dir) = Config::log_dir() else {
        eprintln!("Warning: no state directory available for debug logs");
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter())
            .init();
        return;
    };
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {e}");
    }

    let log_file = log_dir.join(format!(
        "ghostup-{}.log",
        chrono::Utc::now().format("%Y%m%d-%H%M%S")
    ));

    match std::fs::File::create(&log_file) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(file)
                .with_env_filter(filter())
                .init();
            eprintln!("Debug logging enabled: {}", log_file.display());
        }
        Err(e) => {
            eprintln!("Warning: Failed to create log file: {e}");
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter())
                .init();
        }
    }
}

/// Record an event at the level its domain assigns
pub fn log_event_with_tracing(event: &AppEvent) {
    let domain = event.log_target();
    let fields = event.log_fields();

    match event.log_level() {
        tracing::Level::ERROR => error!(domain, event = %fields, "application event"),
        tracing::Level::WARN => warn!(domain, event = %fields, "application event"),
        tracing::Level::INFO => info!(domain, event = %fields, "application event"),
        tracing::Level::DEBUG => debug!(domain, event = %fields, "application event"),
        tracing::Level::TRACE => trace!(domain, event = %fields, "application event"),
    }
}
