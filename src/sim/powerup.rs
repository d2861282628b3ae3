//! Falling power-up pickups
//!
//! A breakable brick that gets destroyed rolls for a pickup. Pickups fall
//! straight down; the paddle catching one starts its effect, and one that
//! leaves the bottom of the field is discarded.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effects::EffectKind;
use super::geometry::Aabb;
use crate::tuning::Tuning;

/// Relative weight of each kind once a spawn roll succeeds
const KIND_WEIGHTS: [(EffectKind, u32); 4] = [
    (EffectKind::Speed, 3),
    (EffectKind::Sticky, 2),
    (EffectKind::PassThrough, 2),
    (EffectKind::PadIncrease, 3),
];

/// Sum of `KIND_WEIGHTS`
pub const TOTAL_KIND_WEIGHT: u32 = 10;

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: EffectKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Seconds the effect lasts once caught
    pub duration: f32,
}

impl Pickup {
    /// Pickup of `kind` dropped at `pos` (the broken brick's corner)
    pub fn new(kind: EffectKind, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            kind,
            pos,
            size: Vec2::new(tuning.pickup_width, tuning.pickup_height),
            vel: Vec2::new(0.0, tuning.pickup_fall_speed),
            duration: tuning.durations.for_kind(kind),
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Fall for `dt`. Returns false once the pickup is below the field.
    pub fn advance(&mut self, dt: f32, field_height: f32) -> bool {
        self.pos += self.vel * dt;
        self.pos.y < field_height
    }
}

/// Map a weighted roll in `[0, TOTAL_KIND_WEIGHT)` to a kind
pub fn kind_for_roll(roll: u32) -> EffectKind {
    let mut acc = 0;
    for (kind, weight) in KIND_WEIGHTS {
        acc += weight;
        if roll < acc {
            return kind;
        }
    }
    // Out-of-range rolls land on the last bucket
    KIND_WEIGHTS[KIND_WEIGHTS.len() - 1].0
}

/// Spawn decision for explicit draws.
///
/// `draw` is the `[1, spawn_odds]` chance roll; only the lucky value spawns.
/// `kind_roll` picks the kind by weight.
pub fn spawn_for_draw(draw: u32, kind_roll: u32, tuning: &Tuning) -> Option<EffectKind> {
    (draw == tuning.lucky_draw).then(|| kind_for_roll(kind_roll))
}

/// Roll for a pickup using the simulation RNG
pub fn roll_spawn<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Option<EffectKind> {
    let draw = rng.random_range(1..=tuning.spawn_odds);
    if draw != tuning.lucky_draw {
        return None;
    }
    let kind_roll = rng.random_range(0..TOTAL_KIND_WEIGHT);
    spawn_for_draw(draw, kind_roll, tuning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_weights_sum() {
        let total: u32 = KIND_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert_eq!(total, TOTAL_KIND_WEIGHT);
    }

    #[test]
    fn test_lucky_draw_spawns() {
        let tuning = Tuning::default();
        assert_eq!(spawn_for_draw(1, 0, &tuning), Some(EffectKind::Speed));
        assert_eq!(spawn_for_draw(1, 3, &tuning), Some(EffectKind::Sticky));
        assert_eq!(spawn_for_draw(1, 5, &tuning), Some(EffectKind::PassThrough));
        assert_eq!(spawn_for_draw(1, 9, &tuning), Some(EffectKind::PadIncrease));
    }

    #[test]
    fn test_unlucky_draw_does_not_spawn() {
        let tuning = Tuning::default();
        for draw in 2..=10 {
            assert_eq!(spawn_for_draw(draw, 0, &tuning), None);
        }
    }

    #[test]
    fn test_every_kind_reachable() {
        for kind in EffectKind::ALL {
            assert!((0..TOTAL_KIND_WEIGHT).any(|roll| kind_for_roll(roll) == kind));
        }
    }

    #[test]
    fn test_spawn_rate_near_one_in_ten() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let trials = 20_000;
        let spawned = (0..trials)
            .filter(|_| roll_spawn(&mut rng, &tuning).is_some())
            .count();
        let rate = spawned as f32 / trials as f32;
        assert!((rate - 0.1).abs() < 0.01, "spawn rate {}", rate);
    }

    #[test]
    fn test_seeded_rolls_reproducible() {
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(roll_spawn(&mut a, &tuning), roll_spawn(&mut b, &tuning));
        }
    }

    #[test]
    fn test_pickup_falls_and_leaves_field() {
        let tuning = Tuning::default();
        let mut pickup = Pickup::new(EffectKind::Speed, Vec2::new(10.0, 700.0), &tuning);
        assert_eq!(pickup.duration, tuning.durations.speed);
        assert!(pickup.advance(0.5, 800.0));
        assert_eq!(pickup.pos.y, 775.0);
        assert!(!pickup.advance(0.5, 800.0));
    }
}
