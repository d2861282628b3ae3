//! Sprite draw calls
//!
//! The simulation never touches graphics state. Each frame it is flattened
//! into a list of `(texture, position, size, rotation, color)` calls that an
//! external sprite renderer executes in order.

use glam::{Mat4, Vec2};
use serde::Serialize;

use super::vertex::SpriteVertex;
use crate::sim::{EffectKind, GameState};
use crate::Color;

/// Sprite texture handles understood by the render collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TextureId {
    Background,
    Block,
    BlockSolid,
    Paddle,
    Ball,
    Particle,
    PowerUp(EffectKind),
}

impl TextureId {
    /// Resource name the renderer loads this texture under
    pub fn name(&self) -> &'static str {
        match self {
            TextureId::Background => "Background",
            TextureId::Block => "Block",
            TextureId::BlockSolid => "Block_solid",
            TextureId::Paddle => "Paddle",
            TextureId::Ball => "Ball",
            TextureId::Particle => "Particle",
            TextureId::PowerUp(EffectKind::Speed) => "Speed",
            TextureId::PowerUp(EffectKind::Sticky) => "Sticky",
            TextureId::PowerUp(EffectKind::PassThrough) => "PassThrough",
            TextureId::PowerUp(EffectKind::PadIncrease) => "Increase",
        }
    }
}

/// One sprite to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawCall {
    pub texture: TextureId,
    /// Top-left corner in field coordinates
    pub position: Vec2,
    pub size: Vec2,
    /// Radians, about the sprite center
    pub rotation: f32,
    pub color: [f32; 4],
}

impl DrawCall {
    pub fn new(texture: TextureId, position: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            texture,
            position,
            size,
            rotation: 0.0,
            color: [color[0], color[1], color[2], 1.0],
        }
    }

    /// Two triangles covering the sprite, rotated about its center
    pub fn quad(&self) -> [SpriteVertex; 6] {
        let center = self.position + self.size / 2.0;
        let half = self.size / 2.0;
        let (sin, cos) = self.rotation.sin_cos();
        let corner = |sx: f32, sy: f32, u: f32, v: f32| {
            let local = Vec2::new(sx * half.x, sy * half.y);
            let rotated = Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos);
            let p = center + rotated;
            SpriteVertex::new(p.x, p.y, u, v, self.color)
        };

        let top_left = corner(-1.0, -1.0, 0.0, 0.0);
        let top_right = corner(1.0, -1.0, 1.0, 0.0);
        let bottom_left = corner(-1.0, 1.0, 0.0, 1.0);
        let bottom_right = corner(1.0, 1.0, 1.0, 1.0);

        [
            bottom_left,
            top_right,
            top_left,
            bottom_left,
            bottom_right,
            top_right,
        ]
    }
}

/// Pickup tint per kind
fn pickup_color(kind: EffectKind) -> Color {
    match kind {
        EffectKind::Speed => [0.5, 0.5, 1.0],
        EffectKind::Sticky => [1.0, 0.5, 1.0],
        EffectKind::PassThrough => [0.5, 1.0, 0.5],
        EffectKind::PadIncrease => [1.0, 0.6, 0.4],
    }
}

/// Particle sprite edge length
const PARTICLE_SIZE: f32 = 10.0;

/// Flatten the game state into draw calls, back to front
pub fn draw_calls(state: &GameState) -> Vec<DrawCall> {
    let mut calls = Vec::with_capacity(
        3 + state.obstacles.len() + state.particles.len() + state.pickups.len(),
    );

    calls.push(DrawCall::new(
        TextureId::Background,
        Vec2::ZERO,
        state.field(),
        crate::colors::WHITE,
    ));

    for obstacle in state.obstacles.iter().filter(|o| !o.destroyed) {
        let texture = if obstacle.solid {
            TextureId::BlockSolid
        } else {
            TextureId::Block
        };
        calls.push(DrawCall::new(texture, obstacle.pos, obstacle.size, obstacle.color));
    }

    calls.push(DrawCall::new(
        TextureId::Paddle,
        state.paddle.pos,
        state.paddle.size,
        crate::colors::WHITE,
    ));

    for particle in &state.particles {
        calls.push(DrawCall {
            texture: TextureId::Particle,
            position: particle.pos - Vec2::splat(PARTICLE_SIZE / 2.0),
            size: Vec2::splat(PARTICLE_SIZE),
            rotation: 0.0,
            color: particle.color,
        });
    }

    let ball = &state.ball;
    calls.push(DrawCall::new(
        TextureId::Ball,
        ball.pos,
        Vec2::splat(ball.radius * 2.0),
        ball.color,
    ));

    for pickup in &state.pickups {
        calls.push(DrawCall::new(
            TextureId::PowerUp(pickup.kind),
            pickup.pos,
            pickup.size,
            pickup_color(pickup.kind),
        ));
    }

    calls
}

/// Vertices for a whole frame, in draw order
pub fn batch_vertices(calls: &[DrawCall]) -> Vec<SpriteVertex> {
    calls.iter().flat_map(|call| call.quad()).collect()
}

/// Orthographic projection mapping field pixels (y down) to clip space
pub fn projection(field: Vec2) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, field.x, field.y, 0.0, -1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::sim::{Obstacle, Pickup};
    use crate::tuning::Tuning;

    fn sample_state() -> GameState {
        let size = Vec2::new(100.0, 50.0);
        let obstacles = vec![
            Obstacle::new(Vec2::new(0.0, 0.0), size, colors::BRICK_BLUE, false),
            Obstacle::new(Vec2::new(100.0, 0.0), size, colors::BRICK_SOLID, true),
            Obstacle::new(Vec2::new(200.0, 0.0), size, colors::BRICK_GREEN, false),
        ];
        let mut state = GameState::new(1, Tuning::default(), obstacles);
        state.obstacles[2].destroy();
        let pickup = Pickup::new(EffectKind::Sticky, Vec2::new(50.0, 60.0), &state.tuning);
        state.pickups.push(pickup);
        state
    }

    #[test]
    fn test_draw_order_and_skips_destroyed() {
        let state = sample_state();
        let calls = draw_calls(&state);
        let textures: Vec<TextureId> = calls.iter().map(|c| c.texture).collect();
        assert_eq!(
            textures,
            vec![
                TextureId::Background,
                TextureId::Block,
                TextureId::BlockSolid,
                TextureId::Paddle,
                TextureId::Ball,
                TextureId::PowerUp(EffectKind::Sticky),
            ]
        );
        assert_eq!(calls[1].color, [0.2, 0.6, 1.0, 1.0]);
        assert_eq!(calls[4].size, Vec2::splat(30.0));
    }

    #[test]
    fn test_quad_covers_sprite() {
        let call = DrawCall::new(
            TextureId::Block,
            Vec2::new(10.0, 20.0),
            Vec2::new(30.0, 40.0),
            colors::WHITE,
        );
        let quad = call.quad();
        let xs: Vec<f32> = quad.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = quad.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_batch_size() {
        let state = sample_state();
        let calls = draw_calls(&state);
        assert_eq!(batch_vertices(&calls).len(), calls.len() * 6);
    }

    #[test]
    fn test_projection_corners() {
        let proj = projection(Vec2::new(1200.0, 800.0));
        let top_left = proj.project_point3(glam::Vec3::new(0.0, 0.0, 0.0));
        let bottom_right = proj.project_point3(glam::Vec3::new(1200.0, 800.0, 0.0));
        assert!((top_left.x + 1.0).abs() < 1e-5 && (top_left.y - 1.0).abs() < 1e-5);
        assert!((bottom_right.x - 1.0).abs() < 1e-5 && (bottom_right.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_texture_names() {
        assert_eq!(TextureId::BlockSolid.name(), "Block_solid");
        assert_eq!(TextureId::PowerUp(EffectKind::PadIncrease).name(), "Increase");
    }
}
