//! Game state and core simulation types
//!
//! The `GameState` exclusively owns every entity. Obstacles and pickups are
//! addressed by index; nothing holds a reference across ticks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{EffectKind, EffectTracker};
use super::geometry::Aabb;
use super::powerup::Pickup;
use crate::tuning::Tuning;
use crate::{Color, colors};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in play (or stuck to the paddle waiting for launch)
    Active,
    /// Every breakable obstacle destroyed
    Won,
    /// Ball fell past the bottom edge; waiting for `reset_round`
    Lost,
}

/// Discrete things that happened during a tick
///
/// Collaborators (audio, HUD) read these after `tick` returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball struck an obstacle; `destroyed` is true if this hit broke it
    ObstacleHit { index: usize, destroyed: bool },
    /// Ball bounced off the top of the paddle
    PaddleHit,
    /// A falling pickup appeared where an obstacle broke
    PowerUpSpawned { kind: EffectKind },
    /// Paddle caught a pickup
    PowerUpHit { kind: EffectKind },
    /// One active effect instance ran out
    EffectExpired { kind: EffectKind },
    /// Ball fell past the bottom edge
    BallLost,
    /// Last breakable obstacle destroyed
    LevelCleared,
}

impl GameEvent {
    /// Sound name understood by the audio collaborator, if this event is audible
    pub fn sound_name(&self) -> Option<&'static str> {
        match self {
            GameEvent::ObstacleHit { .. } => Some("obstacle_hit"),
            GameEvent::PaddleHit => Some("paddle_hit"),
            GameEvent::PowerUpHit { .. } => Some("powerup_hit"),
            _ => None,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left of the bounding square
    pub pos: Vec2,
    pub vel: Vec2,
    /// Constant for the lifetime of the ball
    pub radius: f32,
    pub color: Color,
    /// Glued to the paddle; ignores velocity until launched
    pub stuck: bool,
    /// Ignores collision response against obstacles
    pub pass_through: bool,
}

impl Ball {
    /// Create a stuck ball resting on top of the paddle
    pub fn on_paddle(paddle: &Paddle, radius: f32, vel: Vec2) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel,
            radius,
            color: colors::BALL_BASE,
            stuck: true,
            pass_through: false,
        };
        ball.snap_to(paddle);
        ball
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }

    /// Place the ball centered on top of the paddle
    pub fn snap_to(&mut self, paddle: &Paddle) {
        self.pos = paddle.pos + Vec2::new(paddle.size.x / 2.0 - self.radius, -self.radius * 2.0);
    }

    /// Integrate velocity and bounce off the side and top walls.
    ///
    /// Returns true if the ball has fallen past the bottom of the field.
    pub fn advance(&mut self, dt: f32, field: Vec2) -> bool {
        if self.stuck {
            return false;
        }

        self.pos += self.vel * dt;

        let diameter = self.radius * 2.0;
        if self.pos.x <= 0.0 {
            self.vel.x = self.vel.x.abs();
            self.pos.x = 0.0;
        } else if self.pos.x + diameter >= field.x {
            self.vel.x = -self.vel.x.abs();
            self.pos.x = field.x - diameter;
        }
        if self.pos.y <= 0.0 {
            self.vel.y = self.vel.y.abs();
            self.pos.y = 0.0;
        }

        self.pos.y >= field.y
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (pixels/second)
    pub speed: f32,
}

impl Paddle {
    /// Paddle centered on the bottom edge of the field
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.paddle_width, tuning.paddle_height);
        Self {
            pos: Vec2::new(
                tuning.field_width / 2.0 - size.x / 2.0,
                tuning.field_height - size.y,
            ),
            size,
            speed: tuning.paddle_speed,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Move horizontally, staying inside the field. Returns the applied delta.
    pub fn move_by(&mut self, dx: f32, field_width: f32) -> f32 {
        let before = self.pos.x;
        self.pos.x += dx;
        self.clamp_to_field(field_width);
        self.pos.x - before
    }

    /// Keep `pos.x` within `[0, field_width - width]`
    pub fn clamp_to_field(&mut self, field_width: f32) {
        let max_x = (field_width - self.size.x).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }
}

/// A brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    /// Solid bricks are not broken by normal hits
    pub solid: bool,
    /// Flips to true exactly once
    pub destroyed: bool,
}

impl Obstacle {
    pub fn new(pos: Vec2, size: Vec2, color: Color, solid: bool) -> Self {
        Self {
            pos,
            size,
            color,
            solid,
            destroyed: false,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Mark destroyed. Returns false if it already was.
    pub fn destroy(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        true
    }
}

/// A trail particle (visual only, not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [f32; 4],
    /// Seconds left; removed at <= 0
    pub life: f32,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 500;

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance values this run was started with
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Level bricks; destroyed ones stay in place so indices remain stable
    pub obstacles: Vec<Obstacle>,
    /// Falling pickups
    pub pickups: Vec<Pickup>,
    /// Active timed effects and per-kind counts
    pub effects: EffectTracker,
    /// Visual particles
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Obstacles broken so far
    pub destroyed_count: u32,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Single seeded source for every random draw
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed, balance values and level
    pub fn new(seed: u64, tuning: Tuning, obstacles: Vec<Obstacle>) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle = Paddle::new(&tuning);
        let vel = launch_velocity(&mut rng, &tuning);
        let ball = Ball::on_paddle(&paddle, tuning.ball_radius, vel);

        log::info!(
            "New game: seed {}, {} obstacles ({} breakable)",
            seed,
            obstacles.len(),
            obstacles.iter().filter(|o| !o.solid).count()
        );

        Self {
            seed,
            tuning,
            phase: GamePhase::Active,
            time_ticks: 0,
            ball,
            paddle,
            obstacles,
            pickups: Vec::new(),
            effects: EffectTracker::default(),
            particles: Vec::new(),
            destroyed_count: 0,
            events: Vec::new(),
            rng,
        }
    }

    /// Field dimensions as a vector
    #[inline]
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.tuning.field_width, self.tuning.field_height)
    }

    /// Breakable obstacles not yet destroyed
    pub fn remaining_breakable(&self) -> usize {
        self.obstacles
            .iter()
            .filter(|o| !o.solid && !o.destroyed)
            .count()
    }

    /// Restore paddle and ball to their starting state after a lost ball.
    ///
    /// Pickups and active effects are dropped outright (counts go to zero);
    /// obstacles keep their destroyed flags.
    pub fn reset_round(&mut self) {
        self.paddle = Paddle::new(&self.tuning);
        let vel = launch_velocity(&mut self.rng, &self.tuning);
        self.ball = Ball::on_paddle(&self.paddle, self.tuning.ball_radius, vel);
        self.pickups.clear();
        self.effects.clear();
        self.particles.clear();
        self.phase = GamePhase::Active;
        log::info!("Round reset ({} breakable obstacles left)", self.remaining_breakable());
    }
}

/// Random launch velocity: x spread around zero, fixed upward y
fn launch_velocity(rng: &mut Pcg32, tuning: &Tuning) -> Vec2 {
    let u: f32 = rng.random();
    Vec2::new(
        u * tuning.ball_launch_spread * 2.0 - tuning.ball_launch_spread,
        tuning.ball_launch_vy,
    )
}
