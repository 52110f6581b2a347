//! The three setup stages and the order they run in.

use crate::dotenv::EnvSource;
use crate::error::SetupError;
use devenv_keys::{generate_private_keys, publish_authorized_profiles, KeyTool, KeygenReport};
use devenv_render::{render_and_write, DeploymentEnv, RenderOutcome};
use devenv_types::{Layout, PartyList};
use std::path::PathBuf;

/// One setup stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum Stage {
    /// Render `docker-compose.yml` and the scdb configs.
    Render,
    /// Generate each party's private key.
    Keys,
    /// Publish each party's authorized profile.
    Profiles,
}

impl Stage {
    /// Every stage, in execution order.
    pub const ALL: [Stage; 3] = [Stage::Render, Stage::Keys, Stage::Profiles];

    /// The stage's `--stage` value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Render => "render",
            Self::Keys => "keys",
            Self::Profiles => "profiles",
        }
    }
}

/// What a run produced. Stages that were not selected stay `None`.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub rendered: Option<RenderOutcome>,
    pub keygen: Option<KeygenReport>,
    pub profiles: Option<Vec<PathBuf>>,
}

/// Runs the selected stages in their fixed order.
///
/// `stages` may be in any order and may repeat; each selected stage runs once.
/// An empty selection runs every stage.
///
/// # Errors
///
/// Rendering and profile publishing failures stop the run immediately. Key
/// generation failures never do; they are reported in
/// [`PipelineReport::keygen`].
pub fn run(
    layout: &Layout,
    parties: &PartyList,
    env: &EnvSource,
    tool: &dyn KeyTool,
    stages: &[Stage],
) -> Result<PipelineReport, SetupError> {
    let selected: Vec<Stage> = Stage::ALL
        .into_iter()
        .filter(|stage| stages.is_empty() || stages.contains(stage))
        .collect();

    let mut report = PipelineReport::default();
    for stage in selected {
        tracing::info!(stage = stage.as_str(), "starting stage");
        match stage {
            Stage::Render => {
                let deployment = DeploymentEnv::from_lookup(|key| env.get(key))?;
                report.rendered = Some(render_and_write(layout, &deployment, parties)?);
            }
            Stage::Keys => {
                let keygen = generate_private_keys(tool, layout, parties);
                if !keygen.is_complete() {
                    tracing::warn!(
                        failed = keygen.failed.len(),
                        generated = keygen.generated.len(),
                        "some private keys were not generated"
                    );
                }
                report.keygen = Some(keygen);
            }
            Stage::Profiles => {
                report.profiles = Some(publish_authorized_profiles(tool, layout, parties)?);
            }
        }
    }
    Ok(report)
}
