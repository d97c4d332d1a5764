use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "hibiki=debug,tower_http=debug";

/// Initialize console tracing.
///
/// Safe to call more than once: later calls leave the installed subscriber in place.
pub fn init_telemetry() {
    // Compact console format without timestamps.
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );

    let result = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(console_fmt)
        .try_init();

    match result {
        Ok(()) => tracing::info!("Tracing initialized"),
        Err(_) => tracing::debug!("Tracing subscriber already installed"),
    }
}
