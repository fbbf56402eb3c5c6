use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use posterboard_core::layer::{LayerDescriptor, LayerRegistry};
use posterboard_core::viewport::DEFAULT_MARGIN;
use posterboard_core::PosterError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed poster config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid poster config: {0}")]
    Invalid(#[from] PosterError),
}

/// Poster description as stored in a JSON config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosterConfig {
    /// Fraction of the viewport the reference layer may fill.
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// Layers in stacking order; the first is the reference layer.
    pub layers: Vec<LayerDescriptor>,
}

fn default_margin() -> f64 {
    DEFAULT_MARGIN
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            layers: LayerRegistry::default_poster().all_layers().to_vec(),
        }
    }
}

impl PosterConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded poster config with {} layers from {}",
            config.layers.len(),
            path.display()
        );
        Ok(config)
    }

    /// Validate the layer table and the margin, producing the registry.
    pub fn into_registry(self) -> Result<(LayerRegistry, f64), ConfigError> {
        if !(self.margin > 0.0 && self.margin <= 1.0) {
            return Err(PosterError::InvalidMargin(self.margin).into());
        }
        let registry = LayerRegistry::from_layers(self.layers)?;
        Ok((registry, self.margin))
    }
}
