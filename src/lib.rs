//! Breakout - a deterministic brick-breaker simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, power-ups, game state)
//! - `renderer`: Draw-call contract for an external sprite renderer
//! - `audio`: Named sound events for an external audio player
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 1200.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 140.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 500.0;
    /// How strongly the impact offset from the paddle center bends the bounce
    pub const PADDLE_BOUNCE_STRENGTH: f32 = 4.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    /// Launch velocity: x is drawn from [-SPREAD, SPREAD), y is fixed upward
    pub const BALL_LAUNCH_SPREAD: f32 = 200.0;
    pub const BALL_LAUNCH_VY: f32 = -400.0;

    /// Multiplier used by the speed and paddle-enlarge effects
    pub const EFFECT_FACTOR: f32 = 1.2;

    /// Power-up spawn roll: draw in [1, SPAWN_ODDS], spawn on LUCKY_DRAW
    pub const SPAWN_ODDS: u32 = 10;
    pub const LUCKY_DRAW: u32 = 1;

    /// Falling pickup defaults
    pub const PICKUP_WIDTH: f32 = 60.0;
    pub const PICKUP_HEIGHT: f32 = 20.0;
    pub const PICKUP_FALL_SPEED: f32 = 150.0;

    /// Obstacle height is its width divided by this
    pub const BRICK_ASPECT: f32 = 1.5;
}

/// RGB color used by every entity
pub type Color = [f32; 3];

/// Entity colors
pub mod colors {
    use super::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0];
    pub const BALL_BASE: Color = [0.7, 0.7, 1.0];
    pub const BALL_SPEED: Color = [0.4, 0.4, 1.0];
    pub const BALL_PASS_THROUGH: Color = [1.0, 0.4, 0.4];
    pub const BRICK_SOLID: Color = [0.8, 0.8, 0.7];
    pub const BRICK_BLUE: Color = [0.2, 0.6, 1.0];
    pub const BRICK_GREEN: Color = [0.0, 0.7, 0.0];
    pub const BRICK_YELLOW: Color = [0.9, 0.9, 0.2];
    pub const BRICK_ORANGE: Color = [1.0, 0.5, 0.0];
}
