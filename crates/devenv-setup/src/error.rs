//! Top-level error for a setup run.

use crate::config::ConfigError;
use crate::dotenv::DotenvError;
use devenv_keys::PublishError;
use devenv_render::{EnvError, RenderError};
use thiserror::Error;

/// Any failure that aborts a setup run.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dotenv(#[from] DotenvError),

    #[error("invalid deployment environment: {0}")]
    Env(#[from] EnvError),

    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("publishing authorized profiles failed: {0}")]
    Publish(#[from] PublishError),
}
