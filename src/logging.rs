use std::backtrace::Backtrace;

use tracing_subscriber::{EnvFilter, fmt};

const SERVICE: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Installs the global subscriber. `RUST_LOG` overrides the configured filter.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt().with_env_filter(filter).with_target(false).init();
    set_panic_hook();
    tracing::info!(service = SERVICE, version = VERSION, filter = %log_level, "tracing initialized");
}

fn set_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let message = if let Some(message) = info.payload().downcast_ref::<&str>() {
            *message
        } else if let Some(message) = info.payload().downcast_ref::<String>() {
            message.as_str()
        } else {
            "unknown panic"
        };

        let backtrace = Backtrace::capture();
        match info.location() {
            Some(location) => tracing::error!(
                service = SERVICE,
                panic = %message,
                location = %location,
                backtrace = %backtrace,
                "panic"
            ),
            None => tracing::error!(
                service = SERVICE,
                panic = %message,
                backtrace = %backtrace,
                "panic"
            ),
        }
    }));
}
