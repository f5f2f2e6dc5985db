use crate::constants::*;
use crate::speed::{SpeedModel, SpeedPreset, SpeedTable};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid engine config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("speed presets must be positive and ascending (slow < medium < fast)")]
    Presets,
    #[error("multiplier bounds must satisfy 0 < min <= max, got [{min}, {max}]")]
    MultiplierBounds { min: f64, max: f64 },
    #[error("reset duration must be a finite, non-negative number of milliseconds")]
    ResetDuration,
}

/// Engine settings. Every field is optional in JSON form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub presets: SpeedTable,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
    /// Preset applied when the engine is created. Also accepts the stored
    /// `defaultSpeed` setting name.
    #[serde(alias = "defaultSpeed")]
    pub default_preset: SpeedPreset,
    pub reset_duration_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            presets: SpeedTable::default(),
            min_multiplier: MIN_SPEED_MULTIPLIER,
            max_multiplier: MAX_SPEED_MULTIPLIER,
            default_preset: SpeedPreset::Medium,
            reset_duration_ms: RESET_DURATION_MS,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let SpeedTable { slow, medium, fast } = self.presets;
        let finite = slow.is_finite() && medium.is_finite() && fast.is_finite();
        if !finite || slow <= 0.0 || slow >= medium || medium >= fast {
            return Err(ConfigError::Presets);
        }
        let (min, max) = (self.min_multiplier, self.max_multiplier);
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min > max {
            return Err(ConfigError::MultiplierBounds { min, max });
        }
        if !self.reset_duration_ms.is_finite() || self.reset_duration_ms < 0.0 {
            return Err(ConfigError::ResetDuration);
        }
        Ok(())
    }

    pub fn speed_model(&self) -> SpeedModel {
        SpeedModel {
            table: self.presets,
            min_multiplier: self.min_multiplier,
            max_multiplier: self.max_multiplier,
        }
    }
}
