//! Short UI feedback cues.
//!
//! Describes the blip played for keystrokes, sent/received bubbles and
//! portrait emotion changes as a pitch, length and gain. Producing the sound
//! is up to the front end.

use serde::Serialize;

use crate::ai::emotion::EmotionTag;
use crate::character::Character;

/// What a cue is announcing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "emotion", rename_all = "snake_case")]
pub enum CueKind {
    Keystroke,
    Send,
    UserBubble,
    AiBubble,
    Emotion(EmotionTag),
}

/// A single sine blip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cue {
    pub kind: CueKind,
    pub frequency_hz: f32,
    pub duration_ms: u32,
    pub gain: f32,
}

/// Pitch multiplier applied to a character's base tone per emotion.
pub fn emotion_factor(tag: EmotionTag) -> f32 {
    match tag {
        EmotionTag::Happy => 1.2,     // brighter
        EmotionTag::Thinking => 0.8,  // lower, contemplative
        EmotionTag::Sad => 0.7,       // lowest
        EmotionTag::Waving => 1.1,    // friendly lift
        EmotionTag::Surprised => 1.5, // sharp jump
        EmotionTag::Neutral => 1.0,
    }
}

/// Unscaled cue for `kind`. Neutral emotion changes are silent.
pub fn base_cue(kind: CueKind, character: &Character) -> Option<Cue> {
    let (frequency_hz, duration_ms, gain) = match kind {
        CueKind::Keystroke => (200.0, 50, 0.02),
        CueKind::Send => (600.0, 100, 0.05),
        CueKind::UserBubble => (600.0, 100, 0.05),
        CueKind::AiBubble => (400.0, 100, 0.05),
        CueKind::Emotion(EmotionTag::Neutral) => return None,
        CueKind::Emotion(tag) => (character.tone_base_hz * emotion_factor(tag), 200, 0.05),
    };
    Some(Cue {
        kind,
        frequency_hz,
        duration_ms,
        gain,
    })
}

/// Applies the user's sound settings to cues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueMixer {
    enabled: bool,
    volume: f32,
}

impl Default for CueMixer {
    fn default() -> Self {
        Self::new(true, 1.0)
    }
}

impl CueMixer {
    pub fn new(enabled: bool, volume: f32) -> Self {
        Self {
            enabled,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn muted() -> Self {
        Self::new(false, 0.0)
    }

    pub fn cue(&self, kind: CueKind, character: &Character) -> Option<Cue> {
        if !self.enabled || self.volume == 0.0 {
            return None;
        }
        let mut cue = base_cue(kind, character)?;
        cue.gain *= self.volume;
        Some(cue)
    }
}
