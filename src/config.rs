use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::styles::{DEFAULT_OPTIMIZE_THRESHOLD, DEFAULT_SIMILAR_THRESHOLD};
use crate::{FslError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub library: LibraryConfig,
    pub timeouts: Timeouts,
}

/// Style library tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub auto_optimize: bool,
    pub optimize_threshold: usize,
    pub similar_threshold: f64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            auto_optimize: true,
            optimize_threshold: DEFAULT_OPTIMIZE_THRESHOLD,
            similar_threshold: DEFAULT_SIMILAR_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    #[serde(with = "humantime_serde")]
    pub request: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// `~/.config/fsl/config.toml`, if a home directory is known.
    pub fn central_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("fsl")
                .join("config.toml")
        })
    }

    /// Load config from an explicit path, the central config, or defaults.
    ///
    /// An explicit path must exist; a missing central config falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match Self::central_config_path() {
                Some(central) if central.is_file() => Self::from_file(&central),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| FslError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        let similar = self.library.similar_threshold;
        if !(similar > 0.0 && similar <= 1.0) {
            return Err(FslError::Config(format!(
                "similar_threshold must be in (0, 1], got {similar}"
            )));
        }
        if self.library.optimize_threshold == 0 {
            return Err(FslError::Config(
                "optimize_threshold must be at least 1".to_string(),
            ));
        }
        if self.timeouts.request.is_zero() {
            return Err(FslError::Config(
                "timeouts.request must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
