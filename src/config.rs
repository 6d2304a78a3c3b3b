//! Configuration Management
//!
//! Optional defaults for gcp-inventory, read from
//! `<config_dir>/gcp-inventory/config.json`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Project used when --project is not given
    #[serde(default)]
    pub project_id: Option<String>,
    /// Zone used when --zone is not given; unset means all zones
    #[serde(default)]
    pub zone: Option<String>,
    /// Overall deadline for a run, in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Items requested per page
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub compute_endpoint: Option<String>,
    #[serde(default)]
    pub storage_endpoint: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gcp-inventory").join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read config {:?}: {}", path, e);
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Get effective project (CLI > config > gcloud default)
    pub fn effective_project(&self, cli: Option<&str>) -> String {
        self.effective_project_with(cli, crate::gcp::auth::get_default_project)
    }

    fn effective_project_with(
        &self,
        cli: Option<&str>,
        gcloud_default: impl FnOnce() -> Option<String>,
    ) -> String {
        cli.map(str::to_string)
            .or_else(|| self.project_id.clone())
            .or_else(gcloud_default)
            .unwrap_or_default()
    }

    /// Get effective zone (CLI > config); empty means all zones
    pub fn effective_zone(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.zone.clone())
            .unwrap_or_default()
    }

    /// Get effective timeout (CLI > config)
    pub fn effective_timeout(&self, cli_secs: Option<u64>) -> Option<Duration> {
        cli_secs.or(self.timeout_secs).map(Duration::from_secs)
    }
}
