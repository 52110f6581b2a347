//! On-disk layout of a generated development environment.

use crate::PartyCode;
use std::path::{Path, PathBuf};

/// Name of the generated compose document.
pub const COMPOSE_FILE: &str = "docker-compose.yml";

/// Directory holding compose fragment templates.
pub const COMPOSE_TEMPLATE_DIR: &str = "docker-compose-tmpl";

/// File name of each party's Ed25519 private key.
pub const PRIVATE_KEY_FILE: &str = "ed25519key.pem";

/// File name of each party's authorized profile.
pub const AUTHORIZED_PROFILE_FILE: &str = "authorized_profile.json";

/// Resolves every input and output path relative to one root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Creates a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `docker-compose.yml`
    pub fn compose_file(&self) -> PathBuf {
        self.root.join(COMPOSE_FILE)
    }

    /// `docker-compose-tmpl/`
    pub fn compose_template_dir(&self) -> PathBuf {
        self.root.join(COMPOSE_TEMPLATE_DIR)
    }

    /// `scdb/conf_tmpl/`
    pub fn scdb_template_dir(&self) -> PathBuf {
        self.root.join("scdb").join("conf_tmpl")
    }

    /// `scdb/conf/<protocol>/`
    pub fn scdb_config_dir(&self, protocol: &str) -> PathBuf {
        self.root.join("scdb").join("conf").join(protocol)
    }

    /// `scdb/conf/<protocol>/config.yml`
    pub fn scdb_config_file(&self, protocol: &str) -> PathBuf {
        self.scdb_config_dir(protocol).join("config.yml")
    }

    /// `engine/<party>/conf/`
    pub fn party_conf_dir(&self, party: &PartyCode) -> PathBuf {
        self.root.join("engine").join(party.as_str()).join("conf")
    }

    /// `engine/<party>/conf/ed25519key.pem`
    pub fn private_key_file(&self, party: &PartyCode) -> PathBuf {
        self.party_conf_dir(party).join(PRIVATE_KEY_FILE)
    }

    /// `engine/<party>/conf/authorized_profile.json`
    pub fn authorized_profile_file(&self, party: &PartyCode) -> PathBuf {
        self.party_conf_dir(party).join(AUTHORIZED_PROFILE_FILE)
    }
}
