//! Setup tool for the local multi-party development environment.
//!
//! A run has three stages, always executed in this order:
//!
//! 1. **render**: `docker-compose.yml` and `scdb/conf/<protocol>/config.yml`
//!    from templates and the deployment environment variables.
//! 2. **keys**: an Ed25519 private key per party (best-effort).
//! 3. **profiles**: an `authorized_profile.json` per party listing its peers'
//!    public keys (fail-fast).
//!
//! Every run regenerates its outputs from scratch; nothing is merged with
//! what a previous run left behind.

pub mod config;
pub mod dotenv;
pub mod error;
pub mod pipeline;

pub use dotenv::EnvSource;
pub use error::SetupError;
pub use pipeline::{run, PipelineReport, Stage};

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so diagnostics stay separate from anything the tool
/// prints. An unparseable level falls back to `info`.
pub fn init_tracing(logging: &config::LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
