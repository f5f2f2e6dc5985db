use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedPreset {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 3] = [SpeedPreset::Slow, SpeedPreset::Medium, SpeedPreset::Fast];

    pub fn name(&self) -> &'static str {
        match self {
            SpeedPreset::Slow => "slow",
            SpeedPreset::Medium => "medium",
            SpeedPreset::Fast => "fast",
        }
    }
}

impl fmt::Display for SpeedPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpeedPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slow" => Ok(SpeedPreset::Slow),
            "medium" => Ok(SpeedPreset::Medium),
            "fast" => Ok(SpeedPreset::Fast),
            other => Err(UnknownPreset(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown speed preset: {0:?}")]
pub struct UnknownPreset(pub String);

/// Pixel rates of the three presets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTable {
    pub slow: f64,
    pub medium: f64,
    pub fast: f64,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            slow: SLOW_PX_PER_TICK,
            medium: MEDIUM_PX_PER_TICK,
            fast: FAST_PX_PER_TICK,
        }
    }
}

impl SpeedTable {
    pub fn rate(&self, preset: SpeedPreset) -> f64 {
        match preset {
            SpeedPreset::Slow => self.slow,
            SpeedPreset::Medium => self.medium,
            SpeedPreset::Fast => self.fast,
        }
    }
}

/// Speed presets plus the clamped multiplier range over the medium rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedModel {
    pub table: SpeedTable,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
}

impl Default for SpeedModel {
    fn default() -> Self {
        Self {
            table: SpeedTable::default(),
            min_multiplier: MIN_SPEED_MULTIPLIER,
            max_multiplier: MAX_SPEED_MULTIPLIER,
        }
    }
}

impl SpeedModel {
    #[inline]
    pub fn clamp_multiplier(&self, multiplier: f64) -> f64 {
        multiplier.clamp(self.min_multiplier, self.max_multiplier)
    }

    /// Speed for a multiplier, with the multiplier clamped first.
    /// Returns `None` for NaN or infinite input.
    pub fn speed_for_multiplier(&self, multiplier: f64) -> Option<(f64, f64)> {
        if !multiplier.is_finite() {
            return None;
        }
        let m = self.clamp_multiplier(multiplier);
        Some((self.table.medium * m, m))
    }

    /// Multiplier equivalent of a speed, always within bounds.
    pub fn multiplier_for_speed(&self, speed: f64) -> f64 {
        if self.table.medium <= 0.0 {
            return self.min_multiplier;
        }
        self.clamp_multiplier(speed / self.table.medium)
    }
}
