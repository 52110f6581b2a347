//! `.env` file support for the deployment variables.
//!
//! Values from the file take precedence over the process environment.

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading a `.env` file.
#[derive(Debug, Error)]
pub enum DotenvError {
    /// The file exists but could not be read.
    #[error("failed to read env file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A non-comment line is not `KEY=VALUE`.
    #[error("env file {path} line {line}: expected KEY=VALUE")]
    Syntax { path: String, line: usize },
}

/// Variable lookup: `.env` overrides first, then (optionally) the process
/// environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    overrides: HashMap<String, String>,
    inherit_process: bool,
}

impl EnvSource {
    /// The process environment overlaid with `path`, if it exists.
    ///
    /// # Errors
    ///
    /// A missing file is not an error. An unreadable or malformed one is.
    pub fn from_dotenv(path: &Path) -> Result<Self, DotenvError> {
        let overrides = match std::fs::read_to_string(path) {
            Ok(contents) => {
                let vars = parse(&path.display().to_string(), &contents)?;
                tracing::info!(path = %path.display(), count = vars.len(), "loaded env file");
                vars
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "env file not found, using process environment");
                HashMap::new()
            }
            Err(source) => {
                return Err(DotenvError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Ok(Self {
            overrides,
            inherit_process: true,
        })
    }

    /// Only the given variables; the process environment is ignored.
    pub fn isolated<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            overrides: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            inherit_process: false,
        }
    }

    /// Looks up `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.overrides.get(key) {
            return Some(value.clone());
        }
        if self.inherit_process {
            return std::env::var(key).ok();
        }
        None
    }
}

/// Parses `.env` contents.
///
/// Accepts blank lines, `#` comments, an optional `export ` prefix and values
/// wrapped in matching single or double quotes. Later assignments win.
fn parse(path: &str, contents: &str) -> Result<HashMap<String, String>, DotenvError> {
    let mut vars = HashMap::new();
    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = line.split_once('=').ok_or_else(|| DotenvError::Syntax {
            path: path.to_string(),
            line: idx + 1,
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(DotenvError::Syntax {
                path: path.to_string(),
                line: idx + 1,
            });
        }
        vars.insert(key.to_string(), unquote(value.trim()).to_string());
    }
    Ok(vars)
}

/// A quoted value ends at its closing quote; anything after it is ignored.
/// Unquoted values are cut at an inline ` #` comment.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote) {
            if let Some(end) = inner.find(quote) {
                return &inner[..end];
            }
        }
    }
    match value.find(" #") {
        Some(idx) => value[..idx].trim_end(),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comments_exports_and_quotes() {
        let vars = parse(
            ".env",
            "# deployment\n\nPROTOCOLS=SEMI2K,CHEETAH\nexport MYSQL_PORT = 13306\nSCQL_IMAGE_TAG=\"latest\"\nPOSTGRES_PORT='15432'\nSCDB_PORTS=8080,8081 # two ports\n",
        )
        .unwrap();
        assert_eq!(vars["PROTOCOLS"], "SEMI2K,CHEETAH");
        assert_eq!(vars["MYSQL_PORT"], "13306");
        assert_eq!(vars["SCQL_IMAGE_TAG"], "latest");
        assert_eq!(vars["POSTGRES_PORT"], "15432");
        assert_eq!(vars["SCDB_PORTS"], "8080,8081");
    }

    #[test]
    fn quoted_values_ignore_trailing_comments() {
        let vars = parse(
            ".env",
            "SCQL_IMAGE_TAG=\"latest\" # pinned\nPROTOCOLS='SEMI2K,CHEETAH' # two\nNOTE=\"a # b\"\nOPEN=\"unterminated\n",
        )
        .unwrap();
        assert_eq!(vars["SCQL_IMAGE_TAG"], "latest");
        assert_eq!(vars["PROTOCOLS"], "SEMI2K,CHEETAH");
        assert_eq!(vars["NOTE"], "a # b");
        assert_eq!(vars["OPEN"], "\"unterminated");
    }

    #[test]
    fn rejects_lines_without_assignment() {
        match parse(".env", "A=1\njust words\n") {
            Err(DotenvError::Syntax { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected syntax error, got {other:?}"),
        }
        assert!(matches!(
            parse(".env", "=value\n"),
            Err(DotenvError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn missing_file_falls_back_to_process_env() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let source = EnvSource::from_dotenv(&dir.path().join(".env")).unwrap();
        assert!(source.overrides.is_empty());
        assert!(source.inherit_process);
    }

    #[test]
    fn file_values_override_and_isolated_source_ignores_process() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(".env");
        std::fs::write(&path, "PATH=/from/dotenv\n").unwrap();

        let source = EnvSource::from_dotenv(&path).unwrap();
        assert_eq!(source.get("PATH").as_deref(), Some("/from/dotenv"));

        let isolated = EnvSource::isolated([("ONLY", "here")]);
        assert_eq!(isolated.get("ONLY").as_deref(), Some("here"));
        assert_eq!(isolated.get("PATH"), None);
    }
}
