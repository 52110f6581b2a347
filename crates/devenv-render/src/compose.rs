//! Renders the compose document and per-protocol scdb configuration.

use crate::env::DeploymentEnv;
use crate::error::RenderError;
use crate::templates::TemplateSet;
use devenv_types::{Layout, PartyList};
use std::path::{Path, PathBuf};

/// Every rendered artifact, held in memory until written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEnvironment {
    /// Contents of `docker-compose.yml`.
    pub compose: String,
    /// `(protocol, contents)` of each scdb `config.yml`, in protocol order.
    pub scdb_configs: Vec<(String, String)>,
}

/// Paths written by [`RenderedEnvironment::write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    pub compose_file: PathBuf,
    pub scdb_config_files: Vec<PathBuf>,
}

/// Renders every artifact without touching the filesystem.
///
/// # Errors
///
/// Returns [`RenderError::UndefinedVariable`] if a template references a
/// variable the renderer does not supply.
pub fn render_environment(
    templates: &TemplateSet,
    env: &DeploymentEnv,
    parties: &PartyList,
) -> Result<RenderedEnvironment, RenderError> {
    let image_tag = env.image_tag.as_str();

    let mut scdb = String::new();
    for binding in &env.protocols {
        tracing::info!(protocol = %binding.protocol, port = binding.scdb_port, "rendering scdb service");
        let port = binding.scdb_port.to_string();
        scdb.push_str(&templates.scdb.render(&[
            ("PROTOCOL", binding.protocol.as_str()),
            ("SCQL_IMAGE_TAG", image_tag),
            ("SCDB_PORT", port.as_str()),
        ])?);
    }

    let mut engine = String::new();
    for party in parties {
        engine.push_str(
            &templates
                .engine
                .render(&[("PARTY", party.as_str()), ("SCQL_IMAGE_TAG", image_tag)])?,
        );
    }

    let mysql_port = env.mysql_port.to_string();
    let postgres_port = env.postgres_port.to_string();
    let datasource = templates.datasource.render(&[
        ("MYSQL_PORT", mysql_port.as_str()),
        ("POSTGRES_PORT", postgres_port.as_str()),
    ])?;

    let compose = templates.compose.render(&[
        ("ENGINE", engine.as_str()),
        ("SCDB", scdb.as_str()),
        ("DATASOURCE", datasource.as_str()),
    ])?;

    let mut scdb_configs = Vec::with_capacity(env.protocols.len());
    for binding in &env.protocols {
        let config = templates
            .scdb_config
            .render(&[("PROTOCOL", binding.protocol.as_str())])?;
        scdb_configs.push((binding.protocol.clone(), config));
    }

    Ok(RenderedEnvironment {
        compose,
        scdb_configs,
    })
}

impl RenderedEnvironment {
    /// Writes the compose document, then each scdb configuration.
    ///
    /// Existing files are overwritten. Missing `scdb/conf/<protocol>/`
    /// directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Write`] on the first failed write; files written
    /// before it are left in place.
    pub fn write(&self, layout: &Layout) -> Result<RenderOutcome, RenderError> {
        let compose_file = layout.compose_file();
        write_file(&compose_file, &self.compose)?;
        tracing::info!(path = %compose_file.display(), "wrote compose file");

        let mut scdb_config_files = Vec::with_capacity(self.scdb_configs.len());
        for (protocol, config) in &self.scdb_configs {
            let dir = layout.scdb_config_dir(protocol);
            std::fs::create_dir_all(&dir).map_err(|source| RenderError::Write {
                path: dir.clone(),
                source,
            })?;
            let path = layout.scdb_config_file(protocol);
            write_file(&path, config)?;
            tracing::info!(%protocol, path = %path.display(), "wrote scdb config");
            scdb_config_files.push(path);
        }

        Ok(RenderOutcome {
            compose_file,
            scdb_config_files,
        })
    }
}

/// Loads templates for `layout`, renders everything, then writes it.
///
/// Rendering finishes before the first write, so a template error leaves the
/// output tree untouched.
pub fn render_and_write(
    layout: &Layout,
    env: &DeploymentEnv,
    parties: &PartyList,
) -> Result<RenderOutcome, RenderError> {
    let templates = TemplateSet::load(layout)?;
    render_environment(&templates, env, parties)?.write(layout)
}

fn write_file(path: &Path, contents: &str) -> Result<(), RenderError> {
    std::fs::write(path, contents).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })
}
