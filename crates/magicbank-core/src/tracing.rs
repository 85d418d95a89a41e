use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured JSON tracing to stdout. Call once at service startup.
///
/// Filtering comes from `RUST_LOG`; when it is unset or unparsable,
/// `default_directive` (e.g. `"info"`) is used instead.
///
/// Safe to call multiple times — subsequent calls are silently ignored.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .try_init();
}
