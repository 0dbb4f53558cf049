use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Environment variable that overrides `api.backend_url`.
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";
pub const DEFAULT_CONFIG_PATH: &str = "~/.booking/config.yml";
const DEFAULT_TOKEN_PATH: &str = "~/.booking/token";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub backend_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_token_path")]
    pub token_path: String,
}

fn default_token_path() -> String {
    DEFAULT_TOKEN_PATH.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
        }
    }
}

impl Config {
    pub fn load(filename: impl AsRef<Path>) -> Result<Self, Error> {
        let path = filename.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults.
    pub fn load_or_default(filename: impl AsRef<Path>) -> Result<Self, Error> {
        let path = filename.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.backend_url = Some(url);
        }
        self
    }
}

impl ApiConfig {
    /// Base url without trailing slash; missing or blank is a configuration error.
    pub fn backend_url(&self) -> Result<&str, Error> {
        let url = self
            .backend_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(Error::MissingBackendUrl)?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::InvalidBackendUrl(url.to_string()));
        }
        Ok(url.trim_end_matches('/'))
    }
}

impl StorageConfig {
    pub fn token_path(&self) -> Result<PathBuf, Error> {
        let expanded = shellexpand::full(&self.token_path)
            .map_err(|_| Error::InvalidTokenPath(self.token_path.clone()))?;
        Ok(PathBuf::from(expanded.as_ref()))
    }
}

/// Expand `~` and `$VAR` in a user supplied path.
pub fn expand_path(path: &str) -> Result<PathBuf, Error> {
    let expanded = shellexpand::full(path).map_err(|_| Error::InvalidTokenPath(path.into()))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
