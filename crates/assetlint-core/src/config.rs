use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thresholds the rule catalogue is parameterised by.
///
/// Read once at scan start. Missing fields in a config file fall back to
/// the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub max_triangles_per_mesh: u64,
    /// Applies to the larger of width and height.
    pub max_texture_size: u32,
    pub max_blueprint_nodes: u64,
    pub max_texture_samples_per_material: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_triangles_per_mesh: 100_000,
            max_texture_size: 2048,
            max_blueprint_nodes: 200,
            max_texture_samples_per_material: 8,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("threshold `{0}` must be greater than zero")]
    NonPositive(&'static str),
}

impl Thresholds {
    /// Rejects zero thresholds.
    ///
    /// Scans do not call this; callers validate before scanning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_triangles_per_mesh == 0 {
            return Err(ConfigError::NonPositive("max_triangles_per_mesh"));
        }
        if self.max_texture_size == 0 {
            return Err(ConfigError::NonPositive("max_texture_size"));
        }
        if self.max_blueprint_nodes == 0 {
            return Err(ConfigError::NonPositive("max_blueprint_nodes"));
        }
        if self.max_texture_samples_per_material == 0 {
            return Err(ConfigError::NonPositive(
                "max_texture_samples_per_material",
            ));
        }
        Ok(())
    }
}
