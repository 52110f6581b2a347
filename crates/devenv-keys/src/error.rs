//! Error types for key generation and profile publishing.

use devenv_types::PartyCode;
use std::path::PathBuf;
use thiserror::Error;

/// A single invocation of the key tool failed.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The tool could not be started at all (not installed, not executable).
    #[error("failed to launch {binary}: {source}")]
    Launch {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but exited unsuccessfully.
    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The tool succeeded but printed no key material.
    #[error("`{command}` produced no output")]
    EmptyOutput { command: String },

    /// The directory for a key file could not be created.
    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Publishing authorized profiles failed.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A party's public key could not be extracted.
    #[error("failed to extract public key for party {party}: {source}")]
    Extract {
        party: PartyCode,
        #[source]
        source: KeyError,
    },

    /// A profile could not be serialized.
    #[error("failed to serialize authorized profile: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A profile file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
