//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Order per tick:
//! input, ball movement, pickup fall, ball-vs-brick scan, pickup catch,
//! effect expiry, ball-vs-paddle, particles.

use glam::Vec2;

use super::collision::{aabb_overlap, ball_box_collision, resolve_obstacle_hit, resolve_paddle_hit};
use super::powerup::{Pickup, roll_spawn};
use super::state::{GameEvent, GamePhase, GameState, MAX_PARTICLES, Particle};

/// Key state for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Release a stuck ball
    pub launch: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if state.phase != GamePhase::Active {
        return;
    }

    state.time_ticks += 1;

    apply_input(state, input, dt);

    // Ball movement
    let field = state.field();
    if state.ball.advance(dt, field) {
        log::info!("Ball lost after {} ticks", state.time_ticks);
        state.events.push(GameEvent::BallLost);
        state.phase = GamePhase::Lost;
        return;
    }

    // Pickups fall; ones past the bottom are discarded
    state.pickups.retain_mut(|p| p.advance(dt, field.y));

    let destroyed_this_tick = scan_obstacles(state);
    catch_pickups(state);

    // Effect expiry
    let factor = state.tuning.effect_factor;
    let expired = state
        .effects
        .sweep(dt, &mut state.ball, &mut state.paddle, factor);
    for kind in expired {
        state.events.push(GameEvent::EffectExpired { kind });
    }
    settle_paddle(state);

    // Ball against paddle
    if !state.ball.stuck {
        let paddle_box = state.paddle.aabb();
        if let Some(hit) = ball_box_collision(state.ball.center(), state.ball.radius, &paddle_box) {
            let strength = state.tuning.paddle_bounce_strength;
            if resolve_paddle_hit(&mut state.ball, &state.paddle, &hit, strength) {
                state.events.push(GameEvent::PaddleHit);
            }
        }
    }

    update_particles(state, dt);

    if destroyed_this_tick > 0 && state.remaining_breakable() == 0 {
        log::info!("Level cleared ({} bricks destroyed)", state.destroyed_count);
        state.events.push(GameEvent::LevelCleared);
        state.phase = GamePhase::Won;
    }
}

/// Move the paddle (dragging a stuck ball with it) and handle launch
fn apply_input(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut direction = 0.0;
    if input.move_left {
        direction -= 1.0;
    }
    if input.move_right {
        direction += 1.0;
    }

    if direction != 0.0 {
        let dx = direction * state.paddle.speed * dt;
        let applied = state.paddle.move_by(dx, state.tuning.field_width);
        if state.ball.stuck {
            state.ball.pos.x += applied;
        }
    }

    if input.launch && state.ball.stuck {
        state.ball.stuck = false;
        log::debug!("Ball launched with velocity {:?}", state.ball.vel);
    }
}

/// Collide the ball with every live brick. Returns how many broke.
fn scan_obstacles(state: &mut GameState) -> u32 {
    let mut destroyed_count = 0;

    for index in 0..state.obstacles.len() {
        let obstacle = &mut state.obstacles[index];
        if obstacle.destroyed {
            continue;
        }
        let Some(hit) = ball_box_collision(state.ball.center(), state.ball.radius, &obstacle.aabb())
        else {
            continue;
        };

        resolve_obstacle_hit(&mut state.ball, &hit);

        // Breakables always break; a pass-through ball also smashes solids
        let breaks = !obstacle.solid || state.ball.pass_through;
        let destroyed = breaks && obstacle.destroy();

        if destroyed {
            destroyed_count += 1;
            if !obstacle.solid {
                if let Some(kind) = roll_spawn(&mut state.rng, &state.tuning) {
                    log::debug!("Spawned {} pickup at {:?}", kind, obstacle.pos);
                    state.pickups.push(Pickup::new(kind, obstacle.pos, &state.tuning));
                    state.events.push(GameEvent::PowerUpSpawned { kind });
                }
            }
        }
        state.events.push(GameEvent::ObstacleHit { index, destroyed });
    }

    state.destroyed_count += destroyed_count;
    destroyed_count
}

/// Start the effect of every pickup touching the paddle and drop those pickups
fn catch_pickups(state: &mut GameState) {
    let paddle_box = state.paddle.aabb();
    let mut caught = Vec::new();
    state.pickups.retain(|pickup| {
        if aabb_overlap(&paddle_box, &pickup.aabb()) {
            caught.push((pickup.kind, pickup.duration));
            false
        } else {
            true
        }
    });

    let factor = state.tuning.effect_factor;
    for (kind, duration) in caught {
        state
            .effects
            .activate(kind, duration, &mut state.ball, &mut state.paddle, factor);
        state.events.push(GameEvent::PowerUpHit { kind });
    }
    settle_paddle(state);
}

/// Keep a resized paddle inside the field and a stuck ball centered on it
fn settle_paddle(state: &mut GameState) {
    state.paddle.clamp_to_field(state.tuning.field_width);
    if state.ball.stuck {
        state.ball.snap_to(&state.paddle);
    }
}

/// Ball trail particles (visual only, consumes no RNG)
fn update_particles(state: &mut GameState, dt: f32) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.life -= dt;
        particle.color[3] = particle.life.clamp(0.0, 1.0);
    }
    state.particles.retain(|p| p.life > 0.0);

    if state.ball.stuck {
        return;
    }

    let center = state.ball.center();
    let base_color = state.ball.color;
    for i in 0..2u32 {
        let hash = (state.time_ticks as u32)
            .wrapping_mul(2654435761)
            .wrapping_add(i * 7919);
        let jitter = Vec2::new(
            ((hash % 1000) as f32 / 1000.0 - 0.5) * state.ball.radius,
            ((hash / 1000 % 1000) as f32 / 1000.0 - 0.5) * state.ball.radius,
        );
        let shade = 0.5 + (hash / 1_000_000 % 100) as f32 / 200.0;
        state.particles.push(Particle {
            pos: center + jitter,
            vel: -state.ball.vel * 0.1,
            color: [
                base_color[0] * shade,
                base_color[1] * shade,
                base_color[2] * shade,
                1.0,
            ],
            life: 1.0,
        });
    }

    if state.particles.len() > MAX_PARTICLES {
        let excess = state.particles.len() - MAX_PARTICLES;
        state.particles.drain(..excess);
    }
}
