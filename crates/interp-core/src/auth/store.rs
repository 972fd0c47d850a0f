use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::APP_NAME;

/// Credential file name in the config directory
const CREDENTIAL_FILE: &str = "credentials.json";

/// Holds at most one bearer token.
///
/// `read` never fails: a backend that cannot be read reports no token, which
/// only means the next request goes out unauthenticated.
pub trait CredentialStore: Send + Sync {
    fn read(&self) -> Option<String>;

    /// Persist `token`, replacing any previous value
    fn write(&self, token: &str) -> Result<()>;

    /// Remove the token. Succeeds when nothing is stored.
    fn evict(&self) -> Result<()>;

    fn is_present(&self) -> bool {
        self.read().is_some()
    }
}

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn read(&self) -> Option<String> {
        match self.token.lock() {
            Ok(token) => token.clone(),
            Err(_) => {
                warn!("Credential slot poisoned");
                None
            }
        }
    }

    fn write(&self, token: &str) -> Result<()> {
        let mut slot = self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("Credential slot poisoned"))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn evict(&self) -> Result<()> {
        let mut slot = self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("Credential slot poisoned"))?;
        *slot = None;
        Ok(())
    }
}

/// On-disk form of the stored credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    pub stored_at: DateTime<Utc>,
}

/// Token persisted as a small JSON file, by default
/// `<config dir>/interp/credentials.json`.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform config directory
    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(Self::new(config_dir.join(APP_NAME).join(CREDENTIAL_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full stored record, including when it was written
    pub fn load(&self) -> Result<Option<StoredToken>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents =
            std::fs::read_to_string(&self.path).context("Failed to read credential file")?;
        let stored: StoredToken =
            serde_json::from_str(&contents).context("Failed to parse credential file")?;
        Ok(Some(stored))
    }
}

impl CredentialStore for FileCredentialStore {
    fn read(&self) -> Option<String> {
        match self.load() {
            Ok(stored) => stored.map(|s| s.token),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Ignoring unreadable credential file");
                None
            }
        }
    }

    fn write(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create credential directory")?;
        }
        let stored = StoredToken {
            token: token.to_string(),
            stored_at: Utc::now(),
        };
        let contents = serde_json::to_string_pretty(&stored)?;
        std::fs::write(&self.path, contents).context("Failed to write credential file")?;
        Ok(())
    }

    fn evict(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).context("Failed to remove credential file")?;
        }
        Ok(())
    }
}
