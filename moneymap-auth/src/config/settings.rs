use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AuthError;
use crate::storage::FileStore;

const MAX_SIMULATED_LATENCY_MS: u64 = 10_000;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Directory holding the key-value files. Defaults to `<data dir>/moneymap`.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,

    /// Delay applied by the mock session service and preference saves
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
}

fn default_simulated_latency_ms() -> u64 {
    1000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: None,
            simulated_latency_ms: default_simulated_latency_ms(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("MONEYMAP_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(
                config::Environment::with_prefix("MONEYMAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.simulated_latency_ms > MAX_SIMULATED_LATENCY_MS {
            return Err(format!(
                "simulated_latency_ms must be at most {}",
                MAX_SIMULATED_LATENCY_MS
            ));
        }
        if let Some(dir) = &self.storage_dir {
            if dir.as_os_str().is_empty() {
                return Err("storage_dir must not be empty".to_string());
            }
        }
        Ok(())
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// Open the file store at the configured directory, or the default one
    pub fn open_storage(&self) -> Result<FileStore, AuthError> {
        match &self.storage_dir {
            Some(dir) => FileStore::new(dir.clone()),
            None => FileStore::open_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.simulated_latency(), Duration::from_secs(1));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn rejects_excessive_latency() {
        let settings = Settings {
            simulated_latency_ms: 60_000,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_empty_storage_dir() {
        let settings = Settings {
            storage_dir: Some(PathBuf::new()),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn open_storage_creates_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("store");
        let settings = Settings {
            storage_dir: Some(root.clone()),
            ..Settings::default()
        };

        let store = settings.open_storage().unwrap();
        assert_eq!(store.root(), root.as_path());
        assert!(root.is_dir());
    }
}
