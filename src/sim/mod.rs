//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by index, compacted after each pass)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod effects;
pub mod geometry;
pub mod level;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{
    Hit, Side, aabb_overlap, ball_box_collision, resolve_obstacle_hit, resolve_paddle_hit,
};
pub use effects::{ActiveEffect, EffectError, EffectKind, EffectTracker};
pub use geometry::Aabb;
pub use level::{LevelError, load_level, load_level_or_empty, parse_level};
pub use powerup::{Pickup, roll_spawn, spawn_for_draw};
pub use state::{Ball, GameEvent, GamePhase, GameState, Obstacle, Paddle, Particle};
pub use tick::{TickInput, tick};
