//! Sound event mapping
//!
//! The simulation only names what happened; an `AudioSink` owned by the host
//! decides how (and whether) to play it.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits a brick
    ObstacleHit,
    /// Paddle catches a pickup
    PowerUpHit,
    /// Ball bounces off the paddle
    PaddleHit,
    /// Background track
    Music,
}

impl SoundEffect {
    /// Event name shared with the audio player
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::ObstacleHit => "obstacle_hit",
            SoundEffect::PowerUpHit => "powerup_hit",
            SoundEffect::PaddleHit => "paddle_hit",
            SoundEffect::Music => "music",
        }
    }

    /// Asset the audio player should load for this effect
    pub fn asset_path(&self) -> &'static str {
        match self {
            SoundEffect::ObstacleHit => "audio/sounds/Block_hit.wav",
            SoundEffect::PowerUpHit => "audio/sounds/PowerUp_hit.wav",
            SoundEffect::PaddleHit => "audio/sounds/Player_hit.wav",
            SoundEffect::Music => "audio/music/Breakout.mp3",
        }
    }

    /// Sound for a game event, if it makes one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event.sound_name()? {
            "obstacle_hit" => Some(SoundEffect::ObstacleHit),
            "powerup_hit" => Some(SoundEffect::PowerUpHit),
            "paddle_hit" => Some(SoundEffect::PaddleHit),
            _ => None,
        }
    }
}

/// Something that can play sounds
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, looped: bool);
}

/// Play every audible event from a tick. Returns how many sounds were sent.
pub fn dispatch_sounds(events: &[GameEvent], sink: &mut dyn AudioSink) -> usize {
    let mut played = 0;
    for effect in events.iter().filter_map(SoundEffect::for_event) {
        sink.play(effect, false);
        played += 1;
    }
    played
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: u64,
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, looped: bool) {
        self.played += 1;
        log::trace!("sound {} ({}) looped={}", effect.name(), effect.asset_path(), looped);
    }
}
