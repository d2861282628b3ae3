//! Collision detection and response for axis-aligned boxes
//!
//! Two detectors: box-vs-box (pickup catch) and circle-vs-box (ball against
//! bricks and paddle). The circle test reports which face was struck so the
//! resolver knows which velocity component to reflect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::state::{Ball, Paddle};

/// Face of a box struck by the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Result of a circle-vs-box test that overlapped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Struck face, or `None` when the closest point lies on no edge
    /// (ball center inside the box)
    pub side: Option<Side>,
    /// `radius - distance(closest point, ball center)`
    pub penetration: f32,
    /// Closest point on the box to the ball center
    pub point: Vec2,
}

/// Box-vs-box overlap (inclusive on both axes)
#[inline]
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Check a circle against a box
///
/// Tangent contact (distance == radius) is not a hit.
pub fn ball_box_collision(center: Vec2, radius: f32, aabb: &Aabb) -> Option<Hit> {
    let point = aabb.closest_point(center);
    let distance = (point - center).length();

    if distance >= radius {
        return None;
    }

    Some(Hit {
        side: classify_side(point, aabb),
        penetration: radius - distance,
        point,
    })
}

/// Which edge the closest point sits on.
///
/// Coordinates are truncated to whole pixels before comparing and the first
/// match wins in the order left, right, top, bottom, so corner hits resolve
/// horizontally.
fn classify_side(point: Vec2, aabb: &Aabb) -> Option<Side> {
    let (min, max) = (aabb.min(), aabb.max());
    let (px, py) = (point.x as i32, point.y as i32);

    if px == min.x as i32 {
        Some(Side::Left)
    } else if px == max.x as i32 {
        Some(Side::Right)
    } else if py == min.y as i32 {
        Some(Side::Top)
    } else if py == max.y as i32 {
        Some(Side::Bottom)
    } else {
        None
    }
}

/// Distance to move the ball along one axis so it stops overlapping.
///
/// `along` is the center's offset from the contact point on the push axis,
/// `across` the offset on the other axis. For a face contact (`across == 0`)
/// this equals the penetration depth.
fn separation(along: f32, across: f32, radius: f32) -> f32 {
    let needed = (radius * radius - across * across).max(0.0).sqrt();
    (needed - along.abs()).max(0.0)
}

/// Reflect and push the ball out of a brick.
///
/// A pass-through ball gets no response. Returns true if the ball was moved.
pub fn resolve_obstacle_hit(ball: &mut Ball, hit: &Hit) -> bool {
    if ball.pass_through {
        return false;
    }
    let Some(side) = hit.side else {
        return false;
    };

    let offset = ball.center() - hit.point;
    match side {
        Side::Left => {
            ball.vel.x = -ball.vel.x;
            ball.pos.x -= separation(offset.x, offset.y, ball.radius);
        }
        Side::Right => {
            ball.vel.x = -ball.vel.x;
            ball.pos.x += separation(offset.x, offset.y, ball.radius);
        }
        Side::Top => {
            ball.vel.y = -ball.vel.y;
            ball.pos.y -= separation(offset.y, offset.x, ball.radius);
        }
        Side::Bottom => {
            ball.vel.y = -ball.vel.y;
            ball.pos.y += separation(offset.y, offset.x, ball.radius);
        }
    }
    true
}

/// Bounce the ball off the top of the paddle.
///
/// The x velocity is bent by how far from the paddle center the ball struck,
/// y is flipped, and the result is rescaled to the incoming speed so a bounce
/// only changes direction. Other faces get no response. Returns true if the
/// ball bounced.
pub fn resolve_paddle_hit(ball: &mut Ball, paddle: &Paddle, hit: &Hit, strength: f32) -> bool {
    if hit.side != Some(Side::Top) {
        return false;
    }

    let distance_to_center = ball.center().x - paddle.center_x();
    let old_vel = ball.vel;
    let speed = old_vel.length();

    let bent = Vec2::new(old_vel.x + distance_to_center * strength, -old_vel.y);
    ball.vel = bent.normalize_or_zero() * speed;

    let offset = ball.center() - hit.point;
    ball.pos.y -= separation(offset.y, offset.x, ball.radius);
    true
}
