//! Error types for environment parsing and template rendering.

use devenv_types::TypesError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the deployment environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// A required variable is not set.
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    /// A comma-separated list contains an empty entry.
    #[error("environment variable {var} contains an empty entry: {value:?}")]
    EmptyItem { var: &'static str, value: String },

    /// A port value is not a valid TCP port.
    #[error("environment variable {var} has invalid port {value:?}")]
    InvalidPort { var: &'static str, value: String },

    /// The image tag is empty.
    #[error("environment variable {0} must not be empty")]
    Empty(&'static str),

    /// Protocol and port lists differ in length.
    #[error("{protocols} protocols configured but {ports} scdb ports; the lists must pair up")]
    LengthMismatch { protocols: usize, ports: usize },

    /// A protocol name is not a valid path component.
    #[error("invalid protocol: {0}")]
    InvalidProtocol(#[from] TypesError),
}

/// Errors raised while loading, rendering or writing templates.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template source is malformed.
    #[error("template {template}: {message}")]
    Parse { template: String, message: String },

    /// The template references a variable that was not supplied.
    #[error("template {template} references undefined variable {variable}")]
    UndefinedVariable { template: String, variable: String },

    /// A template override exists but could not be read.
    #[error("failed to read template {}: {source}", path.display())]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file or directory could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
