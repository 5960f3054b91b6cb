//! Per-frame side-effect notifications
//!
//! The simulation never performs I/O. Everything the audio layer, the camera
//! owner or the ranking store should react to is collected here and handed back
//! from each tick.

use serde::Serialize;

use super::boss::BossKind;

/// Named sound cues; names match the asset file stems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SoundCue {
    Shoot,
    Hit,
    Explode,
    BossHit,
    PowerUp,
}

impl SoundCue {
    pub const ALL: [SoundCue; 5] = [
        SoundCue::Shoot,
        SoundCue::Hit,
        SoundCue::Explode,
        SoundCue::BossHit,
        SoundCue::PowerUp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Shoot => "shoot",
            SoundCue::Hit => "hit",
            SoundCue::Explode => "explode",
            SoundCue::BossHit => "boss_hit",
            SoundCue::PowerUp => "powerup",
        }
    }
}

/// Screen shake request (frames, pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShakeRequest {
    pub duration: u32,
    pub magnitude: f32,
}

/// Everything that happened in one tick
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameEvents {
    /// Cues in emission order
    pub cues: Vec<SoundCue>,
    /// Score gained this tick
    pub score_delta: u64,
    /// Enemies destroyed by any means this tick
    pub enemies_destroyed: u32,
    /// Strongest shake requested this tick
    pub shake: Option<ShakeRequest>,
    /// A boss fight started this tick
    pub boss_spawned: Option<BossKind>,
    /// A boss (main or mini) fell this tick
    pub boss_defeated: bool,
    /// The boss that fell was a mini-boss
    pub mini_boss_defeated: bool,
    /// New wave number, if the wave advanced
    pub wave_advanced: Option<u32>,
    /// Player lost a life this tick
    pub life_lost: bool,
    /// The run ended this tick
    pub game_over: bool,
    /// Score to append to the persisted ranking
    pub record_score: Option<u64>,
}

impl FrameEvents {
    pub fn cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    /// Keep the request with the larger magnitude (ties go to the longer one)
    pub fn request_shake(&mut self, duration: u32, magnitude: f32) {
        let stronger = match self.shake {
            None => true,
            Some(cur) => {
                magnitude > cur.magnitude
                    || (magnitude == cur.magnitude && duration > cur.duration)
            }
        };
        if stronger {
            self.shake = Some(ShakeRequest {
                duration,
                magnitude,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
            && self.score_delta == 0
            && self.enemies_destroyed == 0
            && self.shake.is_none()
            && self.boss_spawned.is_none()
            && !self.boss_defeated
            && !self.mini_boss_defeated
            && self.wave_advanced.is_none()
            && !self.life_lost
            && !self.game_over
            && self.record_score.is_none()
    }
}
