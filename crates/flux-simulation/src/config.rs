//! Loading simulation parameters and custom themes from JSON

use crate::SimulationParams;
use flux_physics::Palette;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Contents of a `flux` config file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluxConfig {
    pub simulation: SimulationParams,
    /// Replaces the built-in theme list when non-empty
    pub themes: Vec<Palette>,
}

impl FluxConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FluxConfig = serde_json::from_str(json)?;
        config.simulation.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!(
            "✓ Loaded config {} ({} custom themes)",
            path.display(),
            config.themes.len()
        );
        Ok(config)
    }
}
