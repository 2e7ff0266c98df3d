//! Host configuration
//!
//! Describes the shell state an [`OsHost`](crate::OsHost) starts from:
//! working directory, options and variables.
//! It can be taken from the process environment or read from a TOML file:
//!
//! ```toml
//! dir = "/srv/app"
//! errexit = true
//!
//! [variables]
//! MODE = "release"
//! ```

#[cfg(feature = "config-file")]
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "config-file")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Initial state for a host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config-file", derive(Deserialize))]
pub struct HostConfig {
    /// Working directory relative paths resolve against
    #[cfg_attr(feature = "config-file", serde(default))]
    pub dir: PathBuf,

    /// `set -e`
    #[cfg_attr(feature = "config-file", serde(default))]
    pub errexit: bool,

    /// Scalar variables bound at start
    #[cfg_attr(feature = "config-file", serde(default))]
    pub variables: BTreeMap<String, String>,
}

impl HostConfig {
    /// Take the working directory and every environment variable from the
    /// current process
    pub fn from_env() -> Result<Self, ConfigError> {
        let dir = env::current_dir()?;
        let variables = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Ok(HostConfig {
            dir,
            errexit: false,
            variables,
        })
    }

    /// Parse a TOML document. A missing `dir` means the current directory.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: HostConfig = toml::from_str(content)?;
        if config.dir.as_os_str().is_empty() {
            config.dir = env::current_dir()?;
        }
        Ok(config)
    }

    /// Load a TOML config file
    #[cfg(feature = "config-file")]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
