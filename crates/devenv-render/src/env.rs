//! Deployment settings read from environment variables.

use crate::error::EnvError;
use devenv_types::validate_identifier;

/// Comma-separated list of scdb protocols.
pub const PROTOCOLS_VAR: &str = "PROTOCOLS";
/// Comma-separated list of scdb host ports, paired with `PROTOCOLS`.
pub const SCDB_PORTS_VAR: &str = "SCDB_PORTS";
/// Host port of the MySQL datasource.
pub const MYSQL_PORT_VAR: &str = "MYSQL_PORT";
/// Host port of the Postgres datasource.
pub const POSTGRES_PORT_VAR: &str = "POSTGRES_PORT";
/// Image tag shared by scdb and engine services.
pub const IMAGE_TAG_VAR: &str = "SCQL_IMAGE_TAG";

/// One protocol and the host port its scdb proxy is published on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolBinding {
    pub protocol: String,
    pub scdb_port: u16,
}

/// Validated deployment settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentEnv {
    /// Protocols in input order.
    pub protocols: Vec<ProtocolBinding>,
    pub mysql_port: u16,
    pub postgres_port: u16,
    pub image_tag: String,
}

impl DeploymentEnv {
    /// Reads and validates every deployment variable through `lookup`.
    ///
    /// # Errors
    ///
    /// Any missing variable, empty list entry, unparseable port, empty image
    /// tag, or protocol/port count mismatch is returned as an [`EnvError`].
    /// Nothing is written anywhere before this succeeds.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EnvError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |var: &'static str| lookup(var).ok_or(EnvError::Missing(var));

        let protocols = split_list(PROTOCOLS_VAR, &require(PROTOCOLS_VAR)?)?;
        let ports = split_list(SCDB_PORTS_VAR, &require(SCDB_PORTS_VAR)?)?;
        if protocols.len() != ports.len() {
            return Err(EnvError::LengthMismatch {
                protocols: protocols.len(),
                ports: ports.len(),
            });
        }

        let mut bindings = Vec::with_capacity(protocols.len());
        for (protocol, port) in protocols.into_iter().zip(ports) {
            validate_identifier("protocol", &protocol)?;
            bindings.push(ProtocolBinding {
                protocol,
                scdb_port: parse_port(SCDB_PORTS_VAR, &port)?,
            });
        }

        let mysql_port = parse_port(MYSQL_PORT_VAR, require(MYSQL_PORT_VAR)?.trim())?;
        let postgres_port = parse_port(POSTGRES_PORT_VAR, require(POSTGRES_PORT_VAR)?.trim())?;

        let image_tag = require(IMAGE_TAG_VAR)?.trim().to_string();
        if image_tag.is_empty() {
            return Err(EnvError::Empty(IMAGE_TAG_VAR));
        }

        Ok(Self {
            protocols: bindings,
            mysql_port,
            postgres_port,
            image_tag,
        })
    }
}

/// Splits on commas and trims each entry.
fn split_list(var: &'static str, raw: &str) -> Result<Vec<String>, EnvError> {
    let items: Vec<String> = raw.split(',').map(|s| s.trim().to_string()).collect();
    if items.iter().any(String::is_empty) {
        return Err(EnvError::EmptyItem {
            var,
            value: raw.to_string(),
        });
    }
    Ok(items)
}

fn parse_port(var: &'static str, value: &str) -> Result<u16, EnvError> {
    match value.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(EnvError::InvalidPort {
            var,
            value: value.to_string(),
        }),
    }
}
