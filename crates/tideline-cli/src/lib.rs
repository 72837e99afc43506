//! Reference host for the tideline provider: reads a declared file, keeps a
//! state snapshot, and drives the lifecycle hooks.

pub mod cli;
pub mod commands;
pub mod config;
pub mod declared;
pub mod output;
pub mod plan;
pub mod state;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Logs to stderr. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: &str) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
