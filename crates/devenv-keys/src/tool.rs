//! The external cryptography tool.

use crate::error::KeyError;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Operations the key stages need from a cryptography tool.
pub trait KeyTool {
    /// Generates a fresh Ed25519 private key and writes it as PEM to `path`,
    /// replacing any existing file.
    fn generate_private_key(&self, path: &Path) -> Result<(), KeyError>;

    /// Returns the DER-encoded public key for the private key at `path`.
    fn public_key_der(&self, path: &Path) -> Result<Vec<u8>, KeyError>;
}

/// [`KeyTool`] backed by the `openssl` command line.
#[derive(Debug, Clone)]
pub struct OpensslTool {
    binary: PathBuf,
}

impl OpensslTool {
    /// Uses the `openssl` binary at `binary` (a bare name is looked up in `PATH`).
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, command: &mut Command) -> Result<Output, KeyError> {
        let rendered = render_command(command);
        tracing::debug!(command = %rendered, "running key tool");

        let output = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| KeyError::Launch {
                binary: self.binary.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KeyError::CommandFailed {
                command: rendered,
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl Default for OpensslTool {
    fn default() -> Self {
        Self::new("openssl")
    }
}

impl KeyTool for OpensslTool {
    fn generate_private_key(&self, path: &Path) -> Result<(), KeyError> {
        let mut command = Command::new(&self.binary);
        command
            .arg("genpkey")
            .arg("-algorithm")
            .arg("ed25519")
            .arg("-out")
            .arg(path);
        self.run(&mut command)?;
        Ok(())
    }

    fn public_key_der(&self, path: &Path) -> Result<Vec<u8>, KeyError> {
        let mut command = Command::new(&self.binary);
        command
            .arg("pkey")
            .arg("-in")
            .arg(path)
            .arg("-pubout")
            .arg("-outform")
            .arg("DER");
        let output = self.run(&mut command)?;
        if output.stdout.is_empty() {
            return Err(KeyError::EmptyOutput {
                command: render_command(&command),
            });
        }
        Ok(output.stdout)
    }
}

fn render_command(command: &Command) -> String {
    let mut rendered = command.get_program().to_string_lossy().into_owned();
    for arg in command.get_args() {
        rendered.push(' ');
        rendered.push_str(&arg.to_string_lossy());
    }
    rendered
}
