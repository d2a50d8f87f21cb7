//! # Tracker Configuration
//!
//! Settings live in a single YAML file, `tracker_config.yaml`, at the root of
//! the data directory:
//!
//! ```yaml
//! institute_name: "PRINCETON Course Attendance System"
//! administrator: "Aziz Ahmad"
//! developer: "Mosa Khan"
//! data_format_version: "1.0"
//! ```
//!
//! The data directory itself is resolved before the file can be read: an
//! `ATTENDANCE_TRACKER_DATA_DIR` environment override wins, then a
//! `.attendance_redirect` file in the default location, then
//! `~/Documents/Attendance Tracker`.

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "tracker_config.yaml";
pub const DATA_DIR_ENV: &str = "ATTENDANCE_TRACKER_DATA_DIR";
pub const REDIRECT_FILE_NAME: &str = ".attendance_redirect";
const DEFAULT_DIRECTORY_NAME: &str = "Attendance Tracker";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Title printed at the top of every report
    pub institute_name: String,
    pub administrator: String,
    pub developer: String,
    /// Data format version for future migrations
    pub data_format_version: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            institute_name: "PRINCETON Course Attendance System".to_string(),
            administrator: "Aziz Ahmad".to_string(),
            developer: "Mosa Khan".to_string(),
            data_format_version: "1.0".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Load the config from `data_directory`, falling back to defaults when
    /// the file has not been written yet
    pub fn load(data_directory: &Path) -> Result<Self> {
        let path = data_directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: TrackerConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        info!("Loaded tracker config from {:?}", path);
        Ok(config)
    }

    /// Write the config into `data_directory`
    pub fn save(&self, data_directory: &Path) -> Result<()> {
        if !data_directory.exists() {
            fs::create_dir_all(data_directory)?;
            info!("Created data directory: {:?}", data_directory);
        }

        let path = data_directory.join(CONFIG_FILE_NAME);
        let yaml_content = serde_yaml::to_string(self)?;

        // Atomic write using temp file
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved tracker config to {:?}", path);
        Ok(())
    }
}

/// Resolve where class data is kept
pub fn default_data_directory() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            info!("Using data directory from {}: {}", DATA_DIR_ENV, dir);
            return Ok(PathBuf::from(dir.trim()));
        }
    }

    let documents_dir = dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

    Ok(resolve_redirect(documents_dir.join(DEFAULT_DIRECTORY_NAME)))
}

/// Follow a redirect file in `default_dir` if it names an existing directory
pub fn resolve_redirect(default_dir: PathBuf) -> PathBuf {
    let redirect_file = default_dir.join(REDIRECT_FILE_NAME);
    if !redirect_file.exists() {
        return default_dir;
    }

    match fs::read_to_string(&redirect_file) {
        Ok(redirected_path) => {
            let path = PathBuf::from(redirected_path.trim());
            if path.exists() {
                info!("Found redirect file, using data directory: {}", path.display());
                path
            } else {
                warn!(
                    "Redirect file points to non-existent directory: {}. Using default.",
                    path.display()
                );
                default_dir
            }
        }
        Err(e) => {
            error!("Failed to read redirect file: {}. Using default directory.", e);
            default_dir
        }
    }
}
