use anyhow::{Context, Result};
use keyring::Entry;
use tracing::warn;

use super::CredentialStore;
use crate::config::APP_NAME;

/// Fixed account key the bearer token is stored under
const TOKEN_KEY: &str = "token";

/// Bearer token kept in the OS keychain.
///
/// The keychain entry is opened once and reused for every read, write and
/// evict.
pub struct KeyringCredentialStore {
    entry: Entry,
}

impl KeyringCredentialStore {
    pub fn new() -> Result<Self> {
        Self::with_service(APP_NAME)
    }

    /// Use a different keychain service name (separate profiles, tests)
    pub fn with_service(service: &str) -> Result<Self> {
        let entry = Entry::new(service, TOKEN_KEY).context("Failed to create keyring entry")?;
        Ok(Self { entry })
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn read(&self) -> Option<String> {
        match self.entry.get_password() {
            Ok(token) => Some(token),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read token from keychain");
                None
            }
        }
    }

    fn write(&self, token: &str) -> Result<()> {
        self.entry
            .set_password(token)
            .context("Failed to store token in keychain")
    }

    fn evict(&self) -> Result<()> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}
