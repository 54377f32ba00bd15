//! Matrix Terminal: a retro chat window that relays messages to an
//! automation webhook through a one-route proxy.

pub mod client;
pub mod config;
pub mod rain;
pub mod types;

#[cfg(feature = "server")]
pub mod proxy;

#[cfg(feature = "ui")]
pub mod theme;
#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;

/// Install the `tracing` subscriber used by both binaries. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
