//! Connection settings.
//!
//! Resolves the space, region and credentials from command-line values
//! (which clap fills from `DO_*` environment variables) and an optional
//! `config.toml`:
//!
//! ```toml
//! space = "my-space"
//! region = "nyc3"
//! access_key = "DO00..."
//! secret_key = "..."
//! # endpoint = "http://localhost:9000"
//! # path_style = true
//! ```
//!
//! Command-line values win over the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::core::constants;
use crate::core::store::SpacesConfig;
use crate::error::ConfigError;

/// Partially known connection settings.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub space: Option<String>,
    pub region: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint: Option<String>,
    pub path_style: Option<bool>,
}

impl Settings {
    /// Default config file location (`<config_dir>/envspace/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(constants::CONFIG_DIR).join(constants::CONFIG_FILE))
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read, or
    /// `ConfigError::Parse` if the TOML is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let contents = Zeroizing::new(contents);

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load the file at `path`, or the default file if it exists.
    ///
    /// An explicit path must exist; a missing default file yields empty
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the chosen file cannot be read or parsed.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("no config file found");
                Ok(Self::default())
            }
        }
    }

    /// Fill every unset value from `fallback`.
    pub fn or(mut self, mut fallback: Settings) -> Settings {
        Settings {
            space: self.space.take().or(fallback.space.take()),
            region: self.region.take().or(fallback.region.take()),
            access_key: self.access_key.take().or(fallback.access_key.take()),
            secret_key: self.secret_key.take().or(fallback.secret_key.take()),
            endpoint: self.endpoint.take().or(fallback.endpoint.take()),
            path_style: self.path_style.or(fallback.path_style),
        }
    }

    /// Turn complete settings into backend configuration.
    ///
    /// Empty strings count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` naming every required variable that
    /// has no value.
    pub fn resolve(mut self) -> Result<SpacesConfig, ConfigError> {
        let space = non_empty(self.space.take());
        let region = non_empty(self.region.take());
        let access_key = non_empty(self.access_key.take());
        let secret_key = non_empty(self.secret_key.take()).map(Zeroizing::new);

        match (space, region, access_key, secret_key) {
            (Some(space), Some(region), Some(access_key), Some(secret_key)) => Ok(SpacesConfig {
                space,
                region,
                access_key,
                secret_key,
                endpoint: non_empty(self.endpoint.take()),
                path_style: self.path_style.unwrap_or(false),
            }),
            (space, region, access_key, secret_key) => {
                let mut missing = Vec::new();
                if space.is_none() {
                    missing.push(constants::ENV_SPACE_NAME);
                }
                if region.is_none() {
                    missing.push(constants::ENV_SPACE_REGION);
                }
                if access_key.is_none() {
                    missing.push(constants::ENV_ACCESS_KEY);
                }
                if secret_key.is_none() {
                    missing.push(constants::ENV_SECRET_KEY);
                }
                Err(ConfigError::Missing(missing))
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Drop for Settings {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("space", &self.space)
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("path_style", &self.path_style)
            .finish()
    }
}
