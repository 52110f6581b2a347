//! The set of templates the renderer needs.
//!
//! Each template is read from the environment root when present, otherwise
//! the default compiled into the binary is used.

use crate::error::RenderError;
use crate::template::Template;
use devenv_types::Layout;
use std::path::Path;

/// scdb service fragment, one per protocol.
pub const SCDB_TEMPLATE: &str = "scdb.template";
/// Engine service fragment, one per party.
pub const ENGINE_TEMPLATE: &str = "engine.template";
/// MySQL and Postgres service fragment.
pub const DATASOURCE_TEMPLATE: &str = "datasource.template";
/// Outer compose document.
pub const COMPOSE_TEMPLATE: &str = "docker-compose.template";
/// Per-protocol scdb configuration file.
pub const SCDB_CONFIG_TEMPLATE: &str = "config.yml.template";

const BUILTIN_SCDB: &str = include_str!("../templates/scdb.template");
const BUILTIN_ENGINE: &str = include_str!("../templates/engine.template");
const BUILTIN_DATASOURCE: &str = include_str!("../templates/datasource.template");
const BUILTIN_COMPOSE: &str = include_str!("../templates/docker-compose.template");
const BUILTIN_SCDB_CONFIG: &str = include_str!("../templates/config.yml.template");

/// All parsed templates.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub scdb: Template,
    pub engine: Template,
    pub datasource: Template,
    pub compose: Template,
    pub scdb_config: Template,
}

impl TemplateSet {
    /// The templates compiled into the binary.
    pub fn builtin() -> Result<Self, RenderError> {
        Ok(Self {
            scdb: Template::parse(SCDB_TEMPLATE, BUILTIN_SCDB)?,
            engine: Template::parse(ENGINE_TEMPLATE, BUILTIN_ENGINE)?,
            datasource: Template::parse(DATASOURCE_TEMPLATE, BUILTIN_DATASOURCE)?,
            compose: Template::parse(COMPOSE_TEMPLATE, BUILTIN_COMPOSE)?,
            scdb_config: Template::parse(SCDB_CONFIG_TEMPLATE, BUILTIN_SCDB_CONFIG)?,
        })
    }

    /// Loads templates for `layout`, preferring on-disk overrides.
    ///
    /// Compose fragments are looked up in `docker-compose-tmpl/` and the scdb
    /// configuration in `scdb/conf_tmpl/`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ReadTemplate`] if an override exists but cannot
    /// be read, or [`RenderError::Parse`] if any template is malformed.
    pub fn load(layout: &Layout) -> Result<Self, RenderError> {
        let compose_dir = layout.compose_template_dir();
        let scdb_dir = layout.scdb_template_dir();
        Ok(Self {
            scdb: load_one(&compose_dir, SCDB_TEMPLATE, BUILTIN_SCDB)?,
            engine: load_one(&compose_dir, ENGINE_TEMPLATE, BUILTIN_ENGINE)?,
            datasource: load_one(&compose_dir, DATASOURCE_TEMPLATE, BUILTIN_DATASOURCE)?,
            compose: load_one(&compose_dir, COMPOSE_TEMPLATE, BUILTIN_COMPOSE)?,
            scdb_config: load_one(&scdb_dir, SCDB_CONFIG_TEMPLATE, BUILTIN_SCDB_CONFIG)?,
        })
    }
}

fn load_one(dir: &Path, name: &str, builtin: &str) -> Result<Template, RenderError> {
    let path = dir.join(name);
    let template = match std::fs::read_to_string(&path) {
        Ok(source) => {
            tracing::info!(path = %path.display(), "using template override");
            Template::parse(name, &source)?
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Template::parse(name, builtin)?,
        Err(source) => return Err(RenderError::ReadTemplate { path, source }),
    };
    tracing::debug!(
        template = name,
        variables = ?template.variables(),
        "loaded template"
    );
    Ok(template)
}
