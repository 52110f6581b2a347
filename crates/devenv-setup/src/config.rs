//! Tool configuration loading from file and environment variables.

use devenv_types::{PartyList, TypesError, DEFAULT_PARTIES};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Top-level tool configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Who takes part in the deployment.
    #[serde(default)]
    pub deployment: DeploymentConfig,

    /// Cryptography tool settings.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Deployment membership.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentConfig {
    /// Party codes, in the order services and peers are listed.
    #[serde(default = "default_parties")]
    pub parties: Vec<String>,
}

/// Cryptography tool configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct KeysConfig {
    /// Path or bare name of the `openssl` binary.
    #[serde(default = "default_openssl_binary")]
    pub openssl_binary: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "devenv_keys=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_parties() -> Vec<String> {
    DEFAULT_PARTIES.iter().map(|p| p.to_string()).collect()
}

fn default_openssl_binary() -> String {
    "openssl".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            parties: default_parties(),
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            openssl_binary: default_openssl_binary(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Config {
    /// The validated party list.
    pub fn party_list(&self) -> Result<PartyList, ConfigError> {
        Ok(PartyList::new(self.deployment.parties.iter().cloned())?)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configured party list is unusable.
    #[error("invalid party list: {0}")]
    Parties(#[from] TypesError),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `DEVENV_PARTIES` overrides `deployment.parties` (comma-separated)
/// - `DEVENV_OPENSSL_BINARY` overrides `keys.openssl_binary`
/// - `DEVENV_LOG_LEVEL` overrides `logging.level`
/// - `DEVENV_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// [`load_config`] with an explicit source for the override variables.
pub fn load_config_with<F>(path: Option<&Path>, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Some(parties) = env("DEVENV_PARTIES") {
        config.deployment.parties = parties
            .split(',')
            .map(|p| p.trim().to_string())
            .collect();
    }
    if let Some(binary) = env("DEVENV_OPENSSL_BINARY") {
        config.keys.openssl_binary = binary;
    }
    if let Some(level) = env("DEVENV_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = env("DEVENV_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("devenv.toml");
        let config = load_config_with(Some(path.as_path()), no_env).unwrap();

        assert_eq!(config.deployment.parties, vec!["alice", "bob", "carol"]);
        assert_eq!(config.keys.openssl_binary, "openssl");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn file_values_are_read_and_partial_sections_default() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("devenv.toml");
        std::fs::write(
            &path,
            "[deployment]\nparties = [\"org1\", \"org2\"]\n\n[logging]\njson = true\n",
        )
        .unwrap();

        let config = load_config_with(Some(path.as_path()), no_env).unwrap();
        assert_eq!(config.deployment.parties, vec!["org1", "org2"]);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.keys.openssl_binary, "openssl");
        assert_eq!(config.party_list().unwrap().len(), 2);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("devenv.toml");
        std::fs::write(&path, "[keys]\nopenssl_binary = \"/usr/bin/openssl\"\n").unwrap();

        let env: HashMap<&str, &str> = [
            ("DEVENV_PARTIES", " x , y "),
            ("DEVENV_OPENSSL_BINARY", "/opt/openssl/bin/openssl"),
            ("DEVENV_LOG_LEVEL", "debug"),
            ("DEVENV_LOG_JSON", "1"),
        ]
        .into_iter()
        .collect();
        let config = load_config_with(Some(path.as_path()), |k| {
            env.get(k).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.deployment.parties, vec!["x", "y"]);
        assert_eq!(config.keys.openssl_binary, "/opt/openssl/bin/openssl");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("devenv.toml");
        std::fs::write(&path, "[deployment\nparties = ").unwrap();
        assert!(matches!(
            load_config_with(Some(path.as_path()), no_env),
            Err(ConfigError::Parse(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path_is_still_read() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(OsStr::from_bytes(b"dev\xffenv.toml"));
        std::fs::write(&path, "[deployment]\nparties = [\"org1\"]\n").unwrap();

        let config = load_config_with(Some(path.as_path()), no_env).unwrap();
        assert_eq!(config.deployment.parties, vec!["org1"]);
    }

    #[test]
    fn duplicate_parties_are_rejected() {
        let mut config = Config::default();
        config.deployment.parties = vec!["alice".to_string(), "alice".to_string()];
        assert!(matches!(
            config.party_list(),
            Err(ConfigError::Parties(TypesError::DuplicateParty(_)))
        ));
    }
}
