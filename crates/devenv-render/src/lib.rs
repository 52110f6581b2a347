//! Compose and scdb configuration renderer.
//!
//! Reads the deployment settings ([`DeploymentEnv`]), fills the compose
//! fragment templates ([`TemplateSet`]) and writes `docker-compose.yml` plus
//! one `scdb/conf/<protocol>/config.yml` per protocol.
//!
//! Rendering is pure and happens entirely in memory; only
//! [`RenderedEnvironment::write`] touches the filesystem. Running twice with
//! the same inputs produces byte-identical files.

mod compose;
mod env;
mod error;
mod template;
mod templates;

pub use compose::{render_and_write, render_environment, RenderOutcome, RenderedEnvironment};
pub use env::{
    DeploymentEnv, ProtocolBinding, IMAGE_TAG_VAR, MYSQL_PORT_VAR, POSTGRES_PORT_VAR,
    PROTOCOLS_VAR, SCDB_PORTS_VAR,
};
pub use error::{EnvError, RenderError};
pub use template::Template;
pub use templates::TemplateSet;
