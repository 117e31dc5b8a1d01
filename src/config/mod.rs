use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::WizardError;
use crate::utils::{
    paths,
    persistence::{ensure_dir, load_json, save_json_atomic},
};
use crate::wizard::form_model::DestinationKind;

/// A release the Release step offers in its select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseOption {
    pub id: String,
    pub label: String,
}

impl ReleaseOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub releases: Vec<ReleaseOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_release: Option<String>,
    pub destinations: Vec<DestinationKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub plain_mode: bool,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            releases: default_releases(),
            default_release: None,
            destinations: vec![DestinationKind::Aws],
            output_dir: None,
            plain_mode: false,
        }
    }
}

fn default_releases() -> Vec<ReleaseOption> {
    vec![
        ReleaseOption::new("rhel-8", "Red Hat Enterprise Linux (RHEL) 8"),
        ReleaseOption::new("centos-8", "CentOS Stream 8"),
    ]
}

impl WizardConfig {
    /// Replaces unusable values with built-in defaults.
    pub fn normalized(mut self) -> Self {
        if self.releases.is_empty() {
            tracing::warn!("configuration lists no releases; using defaults");
            self.releases = default_releases();
        }
        if self.destinations.is_empty() {
            tracing::warn!("configuration lists no destinations; using AWS");
            self.destinations = vec![DestinationKind::Aws];
        }
        if let Some(default) = &self.default_release {
            if !self.releases.iter().any(|r| &r.id == default) {
                tracing::warn!(release = %default, "default release is not offered; ignoring");
                self.default_release = None;
            }
        }
        self
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, WizardError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, WizardError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<WizardConfig, WizardError> {
        if self.path.exists() {
            let config: WizardConfig = load_json(&self.path)?;
            Ok(config.normalized())
        } else {
            Ok(WizardConfig::default())
        }
    }

    pub fn save(&self, config: &WizardConfig) -> Result<(), WizardError> {
        save_json_atomic(config, &self.path)
    }

    /// Directory submitted requests are written to.
    pub fn output_dir(&self, config: &WizardConfig) -> PathBuf {
        config
            .output_dir
            .clone()
            .unwrap_or_else(|| paths::requests_dir_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        let config = manager.load().expect("load");
        assert_eq!(config, WizardConfig::default());
        assert_eq!(manager.output_dir(&config), dir.path().join("requests"));
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        let mut config = WizardConfig::default();
        config.default_release = Some("centos-8".into());
        config.destinations = vec![DestinationKind::Aws, DestinationKind::Gcp];
        config.plain_mode = true;
        manager.save(&config).expect("save");
        assert_eq!(manager.load().expect("load"), config);
    }

    #[test]
    fn empty_lists_fall_back_to_defaults() {
        let config = WizardConfig {
            releases: Vec::new(),
            default_release: Some("fedora".into()),
            destinations: Vec::new(),
            output_dir: None,
            plain_mode: false,
        }
        .normalized();
        assert_eq!(config.releases.len(), 2);
        assert_eq!(config.destinations, vec![DestinationKind::Aws]);
        assert!(config.default_release.is_none());
    }
}
