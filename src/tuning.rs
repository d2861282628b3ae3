//! Data-driven game balance
//!
//! Loaded from JSON. Every field is optional in the file; missing values fall
//! back to the defaults in `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::EffectKind;

/// Error type for tuning loads.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading the file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON or wrong field type.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// A value that would break the simulation.
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Seconds each effect kind stays active after pickup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectDurations {
    pub speed: f32,
    pub sticky: f32,
    pub pass_through: f32,
    pub pad_increase: f32,
}

impl Default for EffectDurations {
    fn default() -> Self {
        Self {
            speed: 10.0,
            sticky: 20.0,
            pass_through: 10.0,
            pad_increase: 10.0,
        }
    }
}

impl EffectDurations {
    pub fn for_kind(&self, kind: EffectKind) -> f32 {
        match kind {
            EffectKind::Speed => self.speed,
            EffectKind::Sticky => self.sticky,
            EffectKind::PassThrough => self.pass_through,
            EffectKind::PadIncrease => self.pad_increase,
        }
    }
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_bounce_strength: f32,

    pub ball_radius: f32,
    pub ball_launch_spread: f32,
    pub ball_launch_vy: f32,

    /// Speed-up and paddle-enlarge multiplier
    pub effect_factor: f32,
    /// Spawn roll range is `[1, spawn_odds]`
    pub spawn_odds: u32,
    pub lucky_draw: u32,

    pub pickup_width: f32,
    pub pickup_height: f32,
    pub pickup_fall_speed: f32,

    pub durations: EffectDurations,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_bounce_strength: PADDLE_BOUNCE_STRENGTH,
            ball_radius: BALL_RADIUS,
            ball_launch_spread: BALL_LAUNCH_SPREAD,
            ball_launch_vy: BALL_LAUNCH_VY,
            effect_factor: EFFECT_FACTOR,
            spawn_odds: SPAWN_ODDS,
            lucky_draw: LUCKY_DRAW,
            pickup_width: PICKUP_WIDTH,
            pickup_height: PICKUP_HEIGHT,
            pickup_fall_speed: PICKUP_FALL_SPEED,
            durations: EffectDurations::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would make the simulation meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("paddle_speed", self.paddle_speed),
            ("effect_factor", self.effect_factor),
            ("pickup_width", self.pickup_width),
            ("pickup_height", self.pickup_height),
            ("pickup_fall_speed", self.pickup_fall_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite and greater than zero",
                });
            }
        }
        let finite = [
            ("paddle_bounce_strength", self.paddle_bounce_strength),
            ("ball_launch_spread", self.ball_launch_spread),
            ("ball_launch_vy", self.ball_launch_vy),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }
        if self.spawn_odds == 0 {
            return Err(ConfigError::Invalid {
                field: "spawn_odds",
                reason: "must be at least 1",
            });
        }
        if self.lucky_draw == 0 || self.lucky_draw > self.spawn_odds {
            return Err(ConfigError::Invalid {
                field: "lucky_draw",
                reason: "must lie in [1, spawn_odds]",
            });
        }
        if self.paddle_width > self.field_width {
            return Err(ConfigError::Invalid {
                field: "paddle_width",
                reason: "wider than the field",
            });
        }
        Ok(())
    }
}
