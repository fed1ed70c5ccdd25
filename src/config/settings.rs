use super::{default_global_config_path, default_state_root, ConfigError};
use crate::catalog::ArtifactType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "https://localhost:8889/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const API_BASE_ENV: &str = "COLLECTION_WIZARD_API_BASE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    pub artifact_type: ArtifactType,
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_root: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_token: None,
            artifact_type: ArtifactType::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            state_root: None,
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Loads settings from an explicit path, or from the global config when
    /// it exists. A missing global config yields defaults; a missing
    /// explicit path is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match explicit {
            Some(path) => Self::from_path(path)?,
            None => {
                let path = default_global_config_path()?;
                if path.exists() {
                    Self::from_path(&path)?
                } else {
                    Self::default()
                }
            }
        };
        let settings = settings.with_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(api_base) = std::env::var(API_BASE_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            self.api_base = api_base;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let api_base = self.api_base.trim();
        if api_base.is_empty() {
            return Err(ConfigError::Settings(
                "`api_base` must be non-empty".to_string(),
            ));
        }
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ConfigError::Settings(format!(
                "`api_base` must be an http(s) url, got `{api_base}`"
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Settings(
                "`timeout_secs` must be greater than zero".to_string(),
            ));
        }
        if let Some(root) = &self.state_root {
            if !root.is_absolute() {
                return Err(ConfigError::Settings(
                    "`state_root` must be an absolute path".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn resolve_state_root(&self) -> Result<PathBuf, ConfigError> {
        match &self.state_root {
            Some(root) => Ok(root.clone()),
            None => default_state_root(),
        }
    }
}
