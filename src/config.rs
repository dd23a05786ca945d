//! Configuration file handling.
//!
//! The configuration file is stored at `$BALANCES_HOME/config.json`. Besides identifying itself,
//! it remembers the last set of inputs (export file paths and initial balances) so that a report
//! can be re-run without typing them again.

use crate::model::Amount;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "balances";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$BALANCES_HOME` and from there it loads `$BALANCES_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory and writes a fresh `config.json` into it.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists or if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the balances home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("The config file already exists '{}'", config_path.display())
        }
        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// Loads `config.json` from `balances_home`. The home directory is created if needed and a
    /// missing config file is treated as a default one, so the app works before `init` is run.
    pub async fn load(balances_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = balances_home.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the balances home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path).await?
        } else {
            debug!(
                "No config file at '{}', using defaults",
                config_path.display()
            );
            ConfigFile::default()
        };

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The inputs that were remembered the last time `--remember` was used, if any.
    pub fn last_entry(&self) -> Option<&LastEntry> {
        self.config_file.last_entry.as_ref()
    }

    /// Replaces the remembered inputs and writes the config file.
    pub async fn save_last_entry(&mut self, entry: LastEntry) -> Result<()> {
        self.config_file.last_entry = Some(entry);
        self.config_file.save(&self.config_path).await
    }
}

/// The inputs of one report: the two export files and the balance of each account at the end of
/// its first transaction day.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct LastEntry {
    pub chequing_path: PathBuf,
    pub saving_path: PathBuf,
    pub chequing_initial: Amount,
    pub saving_initial: Amount,
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "balances",
///   "config_version": 1,
///   "last_entry": {
///     "chequing_path": "/home/me/exports/chequing.csv",
///     "saving_path": "/home/me/exports/saving.csv",
///     "chequing_initial": "$1,520.11",
///     "saving_initial": "$10,000.00"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "balances"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The most recently remembered inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_entry: Option<LastEntry>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            last_entry: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn entry() -> LastEntry {
        LastEntry {
            chequing_path: PathBuf::from("/exports/chequing.csv"),
            saving_path: PathBuf::from("/exports/saving.csv"),
            chequing_initial: Amount::new(Decimal::new(152011, 2)),
            saving_initial: Amount::new(Decimal::from(10000)),
        }
    }

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("balances_home");
        let config = Config::create(&home).await.unwrap();
        assert!(config.root().is_dir());
        assert!(config.config_path().is_file());
        assert!(config.last_entry().is_none());
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path()).await.unwrap();
        let err = Config::create(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load_without_file() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("new_home");
        let config = Config::load(&home).await.unwrap();
        assert!(home.is_dir());
        assert!(config.last_entry().is_none());
        assert!(!config.config_path().exists());
    }

    #[tokio::test]
    async fn test_last_entry_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::create(dir.path()).await.unwrap();
        config.save_last_entry(entry()).await.unwrap();

        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(loaded.last_entry(), Some(&entry()));
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(&path, r#"{"app_name": "balances", "config_version": 1}"#)
            .await
            .unwrap();
        let config = ConfigFile::load(&path).await.unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(&path, r#"{"app_name": "wrong_app", "config_version": 1}"#)
            .await
            .unwrap();
        let result = ConfigFile::load(&path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("last_entry"));
    }
}
