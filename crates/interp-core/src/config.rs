//! Client configuration.
//!
//! Settings are read from `~/.config/interp/config.json` and then overlaid
//! with environment variables, so a deployment can pin the API address
//! without touching the file:
//!
//! - `INTERP_API_URL`: base address used when no hostname rule applies
//! - `INTERP_SIGNALING_DOMAIN`: media signaling host for joining call rooms
//! - `INTERP_ORIGIN`: origin the client is considered to be served from

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::endpoint::{self, ExecutionContext};

/// Application name used for config directory paths and the keychain service
pub const APP_NAME: &str = "interp";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Signaling host used when none is configured
pub const DEFAULT_SIGNALING_DOMAIN: &str = "meet.interpretation-service.com:8443";

pub const ENV_API_URL: &str = "INTERP_API_URL";
pub const ENV_SIGNALING_DOMAIN: &str = "INTERP_SIGNALING_DOMAIN";
pub const ENV_ORIGIN: &str = "INTERP_ORIGIN";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_url: Option<String>,
    pub signaling_domain: Option<String>,
    pub origin: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Like `load`, but an unreadable or corrupt file falls back to the
    /// defaults. Environment overrides still apply.
    pub fn load_or_default() -> Self {
        Self::with_fallback(Self::load_file(), |key| std::env::var(key).ok())
    }

    fn with_fallback<F>(loaded: Result<Self>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = loaded.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        });
        config.apply_overrides(lookup);
        config
    }

    /// Load only the config file, without environment overrides
    pub fn load_file() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Read a config file at `path`; a missing file gives the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Overlay values from `lookup`; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            self.api_url = Some(url);
        }
        if let Some(domain) = get(ENV_SIGNALING_DOMAIN) {
            self.signaling_domain = Some(domain);
        }
        if let Some(origin) = get(ENV_ORIGIN) {
            self.origin = Some(origin);
        }
    }

    pub fn signaling_domain(&self) -> &str {
        self.signaling_domain
            .as_deref()
            .unwrap_or(DEFAULT_SIGNALING_DOMAIN)
    }

    pub fn execution_context(&self) -> ExecutionContext {
        match self.origin.as_deref() {
            Some(origin) => ExecutionContext::from_origin(origin),
            None => ExecutionContext::Headless,
        }
    }

    /// API base address for the configured origin and override
    pub fn base_url(&self) -> String {
        endpoint::resolve_base_url(&self.execution_context(), self.api_url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.signaling_domain(), DEFAULT_SIGNALING_DOMAIN);
        assert_eq!(config.execution_context(), ExecutionContext::Headless);
        assert_eq!(config.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config {
            api_url: Some("http://from-file:8000".to_string()),
            last_email: Some("a@b.c".to_string()),
            ..Default::default()
        };
        let vars = env(&[
            (ENV_API_URL, "https://api.example.org"),
            (ENV_SIGNALING_DOMAIN, "meet.example.org"),
            (ENV_ORIGIN, ""),
        ]);
        config.apply_overrides(|k| vars.get(k).cloned());

        assert_eq!(config.api_url.as_deref(), Some("https://api.example.org"));
        assert_eq!(config.signaling_domain(), "meet.example.org");
        assert_eq!(config.origin, None);
        assert_eq!(config.last_email.as_deref(), Some("a@b.c"));
        assert_eq!(config.base_url(), "https://api.example.org");
    }

    #[test]
    fn test_origin_drives_resolution() {
        let config = Config {
            api_url: Some("https://api.example.org".to_string()),
            origin: Some("http://192.168.0.12:3000".to_string()),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "http://192.168.0.12:8000");
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let loaded = Config::load_from(&path);
        assert!(loaded.is_err());

        let vars = env(&[(ENV_API_URL, "https://api.example.org")]);
        let config = Config::with_fallback(loaded, |k| vars.get(k).cloned());
        assert_eq!(config.api_url.as_deref(), Some("https://api.example.org"));
        assert_eq!(config.last_email, None);
        assert_eq!(config.signaling_domain(), DEFAULT_SIGNALING_DOMAIN);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_json_shape() {
        let config: Config = serde_json::from_str(r#"{"last_email": "x@y.z"}"#).unwrap();
        assert_eq!(config.last_email.as_deref(), Some("x@y.z"));
        assert_eq!(config.api_url, None);
    }
}
