//! Tracing setup. Diagnostics go to stderr so stdout stays clean.

use std::env;
use std::io::{self, IsTerminal};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Set to `json` for JSON lines; anything else prints plain text.
pub const FORMAT_VAR: &str = "PROTODOC_LOG_FORMAT";

/// Install the global subscriber.
///
/// Honors `RUST_LOG`, falling back to `info`.
pub fn init() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    match env::var(FORMAT_VAR).as_deref() {
        Ok("json") => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init()?,
        _ => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_ansi(io::stderr().is_terminal())
                    .with_writer(io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}
