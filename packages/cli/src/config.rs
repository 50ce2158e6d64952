use serde::{Deserialize, Serialize};
use std::path::Path;
use uimap_editor::BackupPolicy;

pub const DEFAULT_CONFIG_NAME: &str = "uimap.config.json";

/// uimap configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Copy the previous file before every save
    #[serde(default = "default_backup")]
    pub backup: bool,

    /// Backup directory, relative to the saved file
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,

    /// Save even when the backup copy cannot be written
    #[serde(default)]
    pub continue_without_backup: bool,
}

fn default_backup() -> bool {
    true
}

fn default_backup_dir() -> String {
    "backups".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn backup_policy(&self) -> BackupPolicy {
        BackupPolicy {
            enabled: self.backup,
            directory: self.backup_dir.clone(),
            continue_without_backup: self.continue_without_backup,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backup: default_backup(),
            backup_dir: default_backup_dir(),
            continue_without_backup: false,
        }
    }
}
