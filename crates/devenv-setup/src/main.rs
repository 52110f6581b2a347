//! devenv-setup binary entry point.

use clap::Parser;
use devenv_keys::OpensslTool;
use devenv_setup::config;
use devenv_setup::{init_tracing, EnvSource, SetupError, Stage};
use devenv_types::Layout;
use std::path::PathBuf;
use std::process::ExitCode;

/// Renders docker-compose and scdb configs, then generates party keys and
/// authorized profiles for the local development environment.
#[derive(Debug, Parser)]
#[command(name = "devenv-setup", version, about)]
struct Cli {
    /// Deployment root containing the templates and receiving the outputs.
    #[arg(long, env = "DEVENV_ROOT", default_value = ".")]
    root: PathBuf,

    /// Tool configuration file [default: <root>/devenv.toml].
    #[arg(long)]
    config: Option<PathBuf>,

    /// Env file overlaid on the process environment [default: <root>/.env].
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Stage to run; repeat to select several. Defaults to all stages.
    #[arg(long = "stage", value_enum)]
    stages: Vec<Stage>,
}

fn resolve_config_path(cli: &Cli) -> (PathBuf, &'static str) {
    if let Some(path) = &cli.config {
        return (path.clone(), "cli-arg");
    }

    if let Ok(path) = std::env::var("DEVENV_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (PathBuf::from(path), "env-var");
        }
    }

    (cli.root.join("devenv.toml"), "default")
}

fn run(cli: &Cli) -> Result<(), SetupError> {
    let (config_path, config_source) = resolve_config_path(cli);
    let config = config::load_config(Some(config_path.as_path()))?;

    init_tracing(&config.logging);

    tracing::info!(
        source = config_source,
        path = %config_path.display(),
        "resolved configuration path"
    );
    if !config_path.exists() {
        tracing::info!(path = %config_path.display(), "config file not found, using defaults");
    }

    let parties = config.party_list()?;
    let layout = Layout::new(&cli.root);
    let env_file = cli
        .env_file
        .clone()
        .unwrap_or_else(|| cli.root.join(".env"));
    let env = EnvSource::from_dotenv(&env_file)?;
    let tool = OpensslTool::new(config.keys.openssl_binary.clone());

    let report = devenv_setup::run(&layout, &parties, &env, &tool, &cli.stages)?;

    if let Some(rendered) = &report.rendered {
        tracing::info!(
            compose = %rendered.compose_file.display(),
            scdb_configs = rendered.scdb_config_files.len(),
            "environment rendered"
        );
    }
    if let Some(keygen) = &report.keygen {
        for (party, error) in &keygen.failed {
            tracing::warn!(party = %party, error = %error, "party has no fresh private key");
        }
    }
    if let Some(profiles) = &report.profiles {
        tracing::info!(count = profiles.len(), "authorized profiles published");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The subscriber may not be up yet if configuration failed.
            tracing::error!(error = %e, "setup failed");
            eprintln!("devenv-setup: {e}");
            ExitCode::FAILURE
        }
    }
}
