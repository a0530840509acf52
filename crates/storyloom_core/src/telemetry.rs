//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a human-readable `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_directive` (e.g. `"info"`
/// or `"storyloom=debug"`) applies.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_telemetry(default_directive: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(default_directive, "Telemetry initialized");
    Ok(())
}
