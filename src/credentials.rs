// Credential persistence: a single API key stored as raw bytes in a file
// under the user's home directory, plus the remote probe used by `init`.

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::output::write_atomically;
use crate::request::RequestBuilder;
use reqwest::StatusCode;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the key file, relative to the home directory.
pub const KEY_FILE_NAME: &str = ".wabeltools";

const KEY_FILE_MODE: u32 = 0o600;

/// An API key. The value never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw key, trimming surrounding whitespace. Empty keys are
    /// rejected.
    pub fn new(raw: &str) -> Result<Self> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(Error::InvalidCredential {
                reason: "the key is empty".into(),
            });
        }
        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Location of the stored key.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.wabeltools`, or `./.wabeltools` when no home directory can
    /// be resolved.
    pub fn default_location() -> Self {
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(KEY_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored key. A missing, unreadable or empty file all mean
    /// the tool has not been initialized.
    pub fn load(&self) -> Result<Credential> {
        let data = fs::read_to_string(&self.path).map_err(|err| {
            tracing::debug!(path = %self.path.display(), error = %err, "no usable key file");
            Error::NotInitialized
        })?;
        Credential::new(&data).map_err(|_| Error::NotInitialized)
    }

    /// Persist the key with owner-only permissions, replacing any previous
    /// value. The old key stays in place until the new one is fully written.
    pub fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source: std::io::Error| Error::Io {
                path: self.path.clone(),
                source,
            })?;
        }

        write_atomically(&self.path, credential.as_str().as_bytes(), KEY_FILE_MODE)?;
        tracing::info!(path = %self.path.display(), "API key saved");
        Ok(())
    }
}

/// Probe the service with a candidate key. Only a 200 answer accepts it;
/// any other status means the key is not usable. Connectivity problems
/// are reported as such.
pub fn validate(api: &ApiClient, candidate: &Credential) -> Result<()> {
    let request = RequestBuilder::new(api.base_url().clone()).validation_probe(candidate)?;
    match api.send(request) {
        Ok(response) if response.status == StatusCode::OK => Ok(()),
        Ok(response) => Err(Error::InvalidCredential {
            reason: format!(
                "{} {}",
                response.status.as_u16(),
                response.status.canonical_reason().unwrap_or("Unknown")
            ),
        }),
        Err(Error::RemoteRejected { status, reason, .. }) => Err(Error::InvalidCredential {
            reason: format!("{status} {reason}"),
        }),
        Err(err) => Err(err),
    }
}
