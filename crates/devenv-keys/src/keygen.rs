//! Per-party private key generation.
//!
//! Failures are isolated per party: an error is logged and the next party is
//! still attempted. This stage never aborts the run.

use crate::error::KeyError;
use crate::tool::KeyTool;
use devenv_types::{Layout, PartyCode, PartyList};

/// Outcome of [`generate_private_keys`].
#[derive(Debug, Default)]
pub struct KeygenReport {
    /// Parties whose key file was (re)written, in party order.
    pub generated: Vec<PartyCode>,
    /// Parties whose key generation failed, with the reason.
    pub failed: Vec<(PartyCode, KeyError)>,
}

impl KeygenReport {
    /// True when every party got a key.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Generates `engine/<party>/conf/ed25519key.pem` for every party.
///
/// Existing keys are overwritten without checking. The party's `conf`
/// directory is created if missing.
pub fn generate_private_keys(
    tool: &dyn KeyTool,
    layout: &Layout,
    parties: &PartyList,
) -> KeygenReport {
    let mut report = KeygenReport::default();
    for party in parties {
        match generate_one(tool, layout, party) {
            Ok(()) => {
                tracing::info!(%party, path = %layout.private_key_file(party).display(), "generated private key");
                report.generated.push(party.clone());
            }
            Err(e) => {
                tracing::error!(%party, error = %e, "private key generation failed, continuing");
                report.failed.push((party.clone(), e));
            }
        }
    }
    report
}

fn generate_one(tool: &dyn KeyTool, layout: &Layout, party: &PartyCode) -> Result<(), KeyError> {
    let dir = layout.party_conf_dir(party);
    std::fs::create_dir_all(&dir).map_err(|source| KeyError::CreateDir {
        path: dir.clone(),
        source,
    })?;
    tool.generate_private_key(&layout.private_key_file(party))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    /// Records calls and fails for one chosen file name.
    struct RecordingTool {
        calls: RefCell<Vec<PathBuf>>,
        fail_for: &'static str,
    }

    impl KeyTool for RecordingTool {
        fn generate_private_key(&self, path: &Path) -> Result<(), KeyError> {
            self.calls.borrow_mut().push(path.to_path_buf());
            if path.to_string_lossy().contains(self.fail_for) {
                return Err(KeyError::CommandFailed {
                    command: "genpkey".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: "boom".to_string(),
                });
            }
            std::fs::write(path, "key").map_err(|source| KeyError::CreateDir {
                path: path.to_path_buf(),
                source,
            })
        }

        fn public_key_der(&self, _path: &Path) -> Result<Vec<u8>, KeyError> {
            unreachable!("keygen never extracts public keys")
        }
    }

    #[test]
    fn failure_for_one_party_does_not_stop_the_others() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let layout = Layout::new(dir.path());
        let tool = RecordingTool {
            calls: RefCell::new(Vec::new()),
            fail_for: "/bob/",
        };

        let report = generate_private_keys(&tool, &layout, &PartyList::default());

        assert_eq!(tool.calls.borrow().len(), 3);
        let generated: Vec<&str> = report.generated.iter().map(PartyCode::as_str).collect();
        assert_eq!(generated, vec!["alice", "carol"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0.as_str(), "bob");
        assert!(!report.is_complete());
        assert!(layout
            .private_key_file(&PartyCode::new("carol").unwrap())
            .exists());
    }
}
