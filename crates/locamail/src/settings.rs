//! Application settings.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Directory name used under the platform config and data directories.
const APP_DIR: &str = "locamail";

/// Settings that persist across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// File name of the email database inside the data directory.
    pub database_file: String,
    /// Overrides the platform data directory.
    pub data_dir: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Store a few welcome emails when the database is empty.
    pub seed_sample_mail: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_file: "locamail.db".to_string(),
            data_dir: None,
            log_filter: "locamail=info,locamail_core=info".to_string(),
            seed_sample_mail: true,
        }
    }
}

impl AppSettings {
    /// Full path of the email database.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        let data_dir = self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        });
        data_dir.join(&self.database_file)
    }
}

/// Default location of the settings file.
pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("settings.json")
}

/// Load settings from `path`, falling back to defaults if the file is missing.
pub async fn load_settings(path: &Path) -> anyhow::Result<AppSettings> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }

    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read settings from {}", path.display()))?;

    serde_json::from_str(&contents).with_context(|| format!("parse settings in {}", path.display()))
}

/// Save settings to `path`, creating its directory.
pub async fn save_settings(path: &Path, settings: &AppSettings) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("create settings directory {}", dir.display()))?;
    }

    let contents = serde_json::to_string_pretty(settings)?;
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("write settings to {}", path.display()))?;

    info!("Settings saved to {}", path.display());
    Ok(())
}
