//! Board settings
//!
//! Serializable so a host page or launcher can hand them over as JSON.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, TARGET_RADIUS};
use crate::error::GameError;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board width in pixels
    pub width: f32,
    /// Board height in pixels
    pub height: f32,
    /// Radius shared by every target
    pub radius: f32,
    /// Target count used when the host supplies none
    pub target_count: u32,
    /// Fixed layout seed; `None` draws fresh OS entropy on each restart
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            radius: TARGET_RADIUS,
            target_count: 5,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| GameError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string(self).map_err(|e| GameError::InvalidSettings(e.to_string()))
    }

    /// Dimensions and radius must be positive and finite
    pub fn validate(&self) -> Result<(), GameError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("radius", self.radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GameError::InvalidSettings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
