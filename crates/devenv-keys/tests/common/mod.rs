use devenv_keys::{KeyError, KeyTool};
use std::cell::Cell;
use std::path::Path;

/// Deterministic stand-in for openssl.
///
/// Each generated key embeds a call counter so repeated runs produce
/// different files. The "public key" is derived from the key file contents.
#[derive(Default)]
pub struct FakeKeyTool {
    generated: Cell<u32>,
    /// Key generation fails for paths containing this fragment.
    fail_generate: Option<&'static str>,
    /// Public key extraction fails for paths containing this fragment.
    fail_extract: Option<&'static str>,
}

impl FakeKeyTool {
    pub fn failing_generate(fragment: &'static str) -> Self {
        Self {
            fail_generate: Some(fragment),
            ..Self::default()
        }
    }

    pub fn failing_extract(fragment: &'static str) -> Self {
        Self {
            fail_extract: Some(fragment),
            ..Self::default()
        }
    }

    pub fn generated(&self) -> u32 {
        self.generated.get()
    }
}

fn unavailable(path: &Path) -> KeyError {
    KeyError::Launch {
        binary: format!("fake-openssl ({})", path.display()),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "tool unavailable"),
    }
}

impl KeyTool for FakeKeyTool {
    fn generate_private_key(&self, path: &Path) -> Result<(), KeyError> {
        let n = self.generated.get() + 1;
        self.generated.set(n);
        if let Some(fragment) = self.fail_generate {
            if path.to_string_lossy().contains(fragment) {
                return Err(unavailable(path));
            }
        }
        std::fs::write(path, format!("FAKE PRIVATE KEY #{n} {}\n", path.display()))
            .map_err(|_| unavailable(path))
    }

    fn public_key_der(&self, path: &Path) -> Result<Vec<u8>, KeyError> {
        if let Some(fragment) = self.fail_extract {
            if path.to_string_lossy().contains(fragment) {
                return Err(unavailable(path));
            }
        }
        let contents = std::fs::read(path).map_err(|_| KeyError::CommandFailed {
            command: format!("pkey -in {}", path.display()),
            status: "exit status: 1".to_string(),
            stderr: "Could not open file".to_string(),
        })?;
        let mut der = b"DER:".to_vec();
        der.extend(contents);
        Ok(der)
    }
}
