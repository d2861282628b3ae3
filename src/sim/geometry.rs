//! Axis-aligned rectangle geometry for bricks, paddle and pickups
//!
//! Screen space: x grows right, y grows down. `pos` is the top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.half_extents()
    }

    /// Inclusive overlap test on both axes (touching edges count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let on_x = self.max().x >= other.min().x && other.max().x >= self.min().x;
        let on_y = self.max().y >= other.min().y && other.max().y >= self.min().y;
        on_x && on_y
    }

    /// Clamp a point into the box
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        let half = self.half_extents();
        let center = self.center();
        center + (point - center).clamp(-half, half)
    }
}
