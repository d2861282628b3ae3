//! Timed power-up effects
//!
//! Every caught pickup pushes an independent `ActiveEffect` that counts down
//! on its own. A per-kind count tracks how many instances are live; the
//! visual/behavioral state of a kind (ball tint, pass-through flag) only
//! returns to baseline when its last instance expires. Stat changes (ball
//! speed, paddle width) are undone per instance so N applies followed by N
//! reverts land back on the starting value.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{Ball, Paddle};
use crate::colors;

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Ball velocity x1.2, blue tint
    Speed,
    /// Ball glued to the paddle until launched
    Sticky,
    /// Ball ignores brick collision response, red tint
    PassThrough,
    /// Paddle width x1.2
    PadIncrease,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Speed,
        EffectKind::Sticky,
        EffectKind::PassThrough,
        EffectKind::PadIncrease,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Speed => "speed",
            EffectKind::Sticky => "sticky",
            EffectKind::PassThrough => "passThrough",
            EffectKind::PadIncrease => "padIncrease",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectKind {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EffectKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| EffectError::UnknownKind(s.to_string()))
    }
}

/// Misuse of the effect bookkeeping. These indicate a logic error in the
/// caller, never a gameplay condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectError {
    /// Tried to revert a kind with no live instances
    #[error("cannot revert {0}: no active instance")]
    NotActive(EffectKind),
    /// Effect name not recognized
    #[error("unknown effect kind `{0}`")]
    UnknownKind(String),
}

/// One timed effect instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    /// Seconds left; the effect expires once this reaches zero or below
    pub remaining: f32,
}

/// Owner of the active-effect list and per-kind counts
#[derive(Debug, Clone, Default, Serialize)]
pub struct EffectTracker {
    active: Vec<ActiveEffect>,
    counts: BTreeMap<EffectKind, u32>,
}

impl EffectTracker {
    /// Live effect instances in pickup order
    pub fn active(&self) -> &[ActiveEffect] {
        &self.active
    }

    /// Number of live instances of `kind`
    pub fn count(&self, kind: EffectKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.count(kind) > 0
    }

    /// Apply `kind` to the ball/paddle and start its timer
    pub fn activate(
        &mut self,
        kind: EffectKind,
        duration: f32,
        ball: &mut Ball,
        paddle: &mut Paddle,
        factor: f32,
    ) {
        apply_effect(kind, ball, paddle, factor);
        self.active.push(ActiveEffect {
            kind,
            remaining: duration,
        });
        *self.counts.entry(kind).or_insert(0) += 1;
        log::debug!("Effect {} on ({} active)", kind, self.count(kind));
    }

    /// Count every timer down by `dt` and revert the ones that ran out.
    ///
    /// Returns the expired kinds in list order.
    pub fn sweep(
        &mut self,
        dt: f32,
        ball: &mut Ball,
        paddle: &mut Paddle,
        factor: f32,
    ) -> Vec<EffectKind> {
        for effect in &mut self.active {
            effect.remaining -= dt;
        }

        let expired: Vec<EffectKind> = self
            .active
            .iter()
            .filter(|e| e.remaining <= 0.0)
            .map(|e| e.kind)
            .collect();
        if expired.is_empty() {
            return expired;
        }

        self.active.retain(|e| e.remaining > 0.0);
        for &kind in &expired {
            if let Err(err) = self.release(kind, ball, paddle, factor) {
                log::error!("Effect sweep: {}", err);
            }
        }
        expired
    }

    /// Drop every effect without reverting (the caller restores baseline)
    pub fn clear(&mut self) {
        self.active.clear();
        self.counts.clear();
    }

    /// Decrement the count for `kind` and undo one instance
    fn release(
        &mut self,
        kind: EffectKind,
        ball: &mut Ball,
        paddle: &mut Paddle,
        factor: f32,
    ) -> Result<(), EffectError> {
        let count = self.count(kind);
        if count == 0 {
            return Err(EffectError::NotActive(kind));
        }

        let last = count == 1;
        revert_effect(kind, last, ball, paddle, factor);
        if last {
            self.counts.remove(&kind);
        } else {
            self.counts.insert(kind, count - 1);
        }
        log::debug!("Effect {} off ({} active)", kind, count - 1);
        Ok(())
    }
}

/// Immediate gameplay change when an effect starts
pub fn apply_effect(kind: EffectKind, ball: &mut Ball, paddle: &mut Paddle, factor: f32) {
    match kind {
        EffectKind::Speed => {
            ball.vel *= factor;
            ball.color = colors::BALL_SPEED;
        }
        EffectKind::Sticky => {
            ball.snap_to(paddle);
            ball.stuck = true;
        }
        EffectKind::PassThrough => {
            ball.pass_through = true;
            ball.color = colors::BALL_PASS_THROUGH;
        }
        EffectKind::PadIncrease => {
            paddle.size.x *= factor;
        }
    }
}

/// Undo one instance of an effect; `last` is true when no other instance of
/// the kind remains afterwards.
pub fn revert_effect(
    kind: EffectKind,
    last: bool,
    ball: &mut Ball,
    paddle: &mut Paddle,
    factor: f32,
) {
    match kind {
        EffectKind::Speed => {
            ball.vel /= factor;
            if last {
                ball.color = colors::BALL_BASE;
            }
        }
        // Unstuck by the launch key, not by the timer
        EffectKind::Sticky => {}
        EffectKind::PassThrough => {
            if last {
                ball.pass_through = false;
                ball.color = colors::BALL_BASE;
            }
        }
        EffectKind::PadIncrease => {
            paddle.size.x /= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    const FACTOR: f32 = 1.2;

    fn fixtures() -> (Ball, Paddle) {
        let paddle = Paddle {
            pos: Vec2::new(500.0, 780.0),
            size: Vec2::new(140.0, 20.0),
            speed: 500.0,
        };
        let ball = Ball {
            pos: Vec2::new(300.0, 300.0),
            vel: Vec2::new(120.0, -400.0),
            radius: 15.0,
            color: colors::BALL_BASE,
            stuck: false,
            pass_through: false,
        };
        (ball, paddle)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= b.abs() * 1e-5 + 1e-4
    }

    #[test]
    fn test_pad_increase_twice_revert_once() {
        let (mut ball, mut paddle) = fixtures();
        let mut tracker = EffectTracker::default();

        tracker.activate(EffectKind::PadIncrease, 5.0, &mut ball, &mut paddle, FACTOR);
        tracker.activate(EffectKind::PadIncrease, 10.0, &mut ball, &mut paddle, FACTOR);
        assert!(approx(paddle.size.x, 140.0 * 1.44));
        assert_eq!(tracker.count(EffectKind::PadIncrease), 2);

        // First instance expires, second keeps running
        let expired = tracker.sweep(6.0, &mut ball, &mut paddle, FACTOR);
        assert_eq!(expired, vec![EffectKind::PadIncrease]);
        assert!(approx(paddle.size.x, 140.0 * 1.2));
        assert_eq!(tracker.count(EffectKind::PadIncrease), 1);
        assert_eq!(tracker.active().len(), 1);
    }

    #[test]
    fn test_single_effects_restore_baseline() {
        for kind in EffectKind::ALL {
            let (mut ball, mut paddle) = fixtures();
            let (ball0, paddle0) = (ball.clone(), paddle.clone());
            let mut tracker = EffectTracker::default();

            tracker.activate(kind, 1.0, &mut ball, &mut paddle, FACTOR);
            assert!(tracker.is_active(kind));
            tracker.sweep(1.0, &mut ball, &mut paddle, FACTOR);

            assert!(!tracker.is_active(kind));
            assert!(tracker.active().is_empty());
            assert!(approx(paddle.size.x, paddle0.size.x));
            assert!(approx(ball.vel.x, ball0.vel.x));
            assert!(approx(ball.vel.y, ball0.vel.y));
            assert_eq!(ball.color, ball0.color);
            assert!(!ball.pass_through);
        }
    }

    #[test]
    fn test_three_overlapping_speed_effects() {
        let (mut ball, mut paddle) = fixtures();
        let speed0 = ball.vel.length();
        let mut tracker = EffectTracker::default();

        for duration in [1.0, 2.0, 3.0] {
            tracker.activate(EffectKind::Speed, duration, &mut ball, &mut paddle, FACTOR);
        }
        assert!(approx(ball.vel.length(), speed0 * 1.2 * 1.2 * 1.2));
        assert_eq!(ball.color, colors::BALL_SPEED);

        tracker.sweep(1.5, &mut ball, &mut paddle, FACTOR);
        assert_eq!(tracker.count(EffectKind::Speed), 2);
        // Tint stays while instances remain
        assert_eq!(ball.color, colors::BALL_SPEED);

        tracker.sweep(1.0, &mut ball, &mut paddle, FACTOR);
        assert_eq!(tracker.count(EffectKind::Speed), 1);
        assert_eq!(ball.color, colors::BALL_SPEED);

        tracker.sweep(1.0, &mut ball, &mut paddle, FACTOR);
        assert_eq!(tracker.count(EffectKind::Speed), 0);
        assert_eq!(ball.color, colors::BALL_BASE);
        assert!(approx(ball.vel.length(), speed0));
    }

    #[test]
    fn test_pass_through_clears_on_last_instance_only() {
        let (mut ball, mut paddle) = fixtures();
        let mut tracker = EffectTracker::default();

        tracker.activate(EffectKind::PassThrough, 1.0, &mut ball, &mut paddle, FACTOR);
        tracker.activate(EffectKind::PassThrough, 2.0, &mut ball, &mut paddle, FACTOR);
        assert!(ball.pass_through);
        assert_eq!(ball.color, colors::BALL_PASS_THROUGH);

        tracker.sweep(1.0, &mut ball, &mut paddle, FACTOR);
        assert!(ball.pass_through);
        assert_eq!(ball.color, colors::BALL_PASS_THROUGH);

        tracker.sweep(1.0, &mut ball, &mut paddle, FACTOR);
        assert!(!ball.pass_through);
        assert_eq!(ball.color, colors::BALL_BASE);
    }

    #[test]
    fn test_sticky_snaps_ball_and_expiry_keeps_it_stuck() {
        let (mut ball, mut paddle) = fixtures();
        let mut tracker = EffectTracker::default();

        tracker.activate(EffectKind::Sticky, 1.0, &mut ball, &mut paddle, FACTOR);
        assert!(ball.stuck);
        assert_eq!(ball.pos, Vec2::new(500.0 + 70.0 - 15.0, 780.0 - 30.0));

        tracker.sweep(2.0, &mut ball, &mut paddle, FACTOR);
        assert_eq!(tracker.count(EffectKind::Sticky), 0);
        // Only the launch key unsticks the ball
        assert!(ball.stuck);
    }

    #[test]
    fn test_same_tick_expiry_of_same_kind() {
        let (mut ball, mut paddle) = fixtures();
        let mut tracker = EffectTracker::default();

        tracker.activate(EffectKind::PassThrough, 1.0, &mut ball, &mut paddle, FACTOR);
        tracker.activate(EffectKind::PassThrough, 1.0, &mut ball, &mut paddle, FACTOR);
        let expired = tracker.sweep(1.0, &mut ball, &mut paddle, FACTOR);
        assert_eq!(expired.len(), 2);
        assert_eq!(tracker.count(EffectKind::PassThrough), 0);
        assert!(!ball.pass_through);
    }

    #[test]
    fn test_release_without_instance_is_error_and_leaves_state() {
        let (mut ball, mut paddle) = fixtures();
        let (ball0, paddle0) = (ball.clone(), paddle.clone());
        let mut tracker = EffectTracker::default();

        let err = tracker
            .release(EffectKind::PadIncrease, &mut ball, &mut paddle, FACTOR)
            .unwrap_err();
        assert_eq!(err, EffectError::NotActive(EffectKind::PadIncrease));
        assert_eq!(err.to_string(), "cannot revert padIncrease: no active instance");
        assert_eq!(paddle.size, paddle0.size);
        assert_eq!(ball.vel, ball0.vel);
        assert_eq!(tracker.count(EffectKind::PadIncrease), 0);
    }

    #[test]
    fn test_release_past_last_instance_never_goes_negative() {
        let (mut ball, mut paddle) = fixtures();
        let mut tracker = EffectTracker::default();

        tracker.activate(EffectKind::Speed, 1.0, &mut ball, &mut paddle, FACTOR);
        tracker.sweep(1.0, &mut ball, &mut paddle, FACTOR);
        let vel = ball.vel;

        assert!(tracker.release(EffectKind::Speed, &mut ball, &mut paddle, FACTOR).is_err());
        assert_eq!(tracker.count(EffectKind::Speed), 0);
        assert_eq!(ball.vel, vel);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("passThrough".parse::<EffectKind>().unwrap(), EffectKind::PassThrough);
        assert_eq!("PADINCREASE".parse::<EffectKind>().unwrap(), EffectKind::PadIncrease);
        assert_eq!(
            "multiball".parse::<EffectKind>().unwrap_err(),
            EffectError::UnknownKind("multiball".to_string())
        );
    }

    fn arb_kind() -> impl Strategy<Value = EffectKind> {
        prop::sample::select(EffectKind::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_counts_match_live_entries(
            ops in prop::collection::vec((arb_kind(), 0.1f32..5.0, 0.0f32..2.0), 1..40)
        ) {
            let (mut ball, mut paddle) = fixtures();
            let mut tracker = EffectTracker::default();

            for (kind, duration, dt) in ops {
                tracker.activate(kind, duration, &mut ball, &mut paddle, FACTOR);
                tracker.sweep(dt, &mut ball, &mut paddle, FACTOR);

                for k in EffectKind::ALL {
                    let live = tracker.active().iter().filter(|e| e.kind == k).count() as u32;
                    prop_assert_eq!(tracker.count(k), live);
                }
                prop_assert!(tracker.active().iter().all(|e| e.remaining > 0.0));
            }
        }

        #[test]
        fn prop_apply_revert_inverse(
            kind in arb_kind(),
            n in 1usize..5,
        ) {
            let (mut ball, mut paddle) = fixtures();
            let (ball0, paddle0) = (ball.clone(), paddle.clone());
            let mut tracker = EffectTracker::default();

            for i in 0..n {
                tracker.activate(kind, 1.0 + i as f32, &mut ball, &mut paddle, FACTOR);
            }
            tracker.sweep(n as f32 + 1.0, &mut ball, &mut paddle, FACTOR);

            prop_assert_eq!(tracker.count(kind), 0);
            prop_assert!(approx(paddle.size.x, paddle0.size.x));
            prop_assert!(approx(ball.vel.x, ball0.vel.x));
            prop_assert!(approx(ball.vel.y, ball0.vel.y));
            prop_assert_eq!(ball.color, ball0.color);
            prop_assert_eq!(ball.pass_through, ball0.pass_through);
        }
    }
}
