//! The fixed roster of roleplay characters.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ai::emotion::EmotionTag;

/// Identifier of a roster character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerId {
    Gandalf,
    Sherlock,
    Robot,
    Knight,
    Alien,
    Sorceress,
}

impl SpeakerId {
    pub const ALL: [SpeakerId; 6] = [
        SpeakerId::Gandalf,
        SpeakerId::Sherlock,
        SpeakerId::Robot,
        SpeakerId::Knight,
        SpeakerId::Alien,
        SpeakerId::Sorceress,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SpeakerId::Gandalf => "gandalf",
            SpeakerId::Sherlock => "sherlock",
            SpeakerId::Robot => "robot",
            SpeakerId::Knight => "knight",
            SpeakerId::Alien => "alien",
            SpeakerId::Sorceress => "sorceress",
        }
    }

    /// Exact, case-sensitive id lookup.
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|speaker| speaker.as_str() == id)
    }

    /// Emotions this character is allowed to display, default first.
    pub fn preferred_emotions(self) -> &'static [EmotionTag] {
        use EmotionTag::*;
        match self {
            SpeakerId::Gandalf => &[Thinking, Neutral, Happy],
            SpeakerId::Sherlock => &[Thinking, Neutral, Surprised],
            SpeakerId::Robot => &[Neutral, Thinking, Happy],
            SpeakerId::Knight => &[Neutral, Happy, Thinking],
            SpeakerId::Alien => &[Happy, Surprised, Waving],
            SpeakerId::Sorceress => &[Thinking, Neutral, Surprised],
        }
    }
}

impl fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static profile of one roster character.
#[derive(Debug, Clone, Serialize)]
pub struct Character {
    pub id: SpeakerId,
    pub name: &'static str,
    pub personality: &'static str,
    pub description: &'static str,
    pub theme_color: &'static str,
    pub background_color: &'static str,
    /// Persona prompt describing how the character speaks.
    pub prompt: &'static str,
    /// Base pitch of the character's emotion cue.
    pub tone_base_hz: f32,
}

impl Character {
    pub fn preferred_emotions(&self) -> &'static [EmotionTag] {
        self.id.preferred_emotions()
    }

    pub fn default_emotion(&self) -> EmotionTag {
        self.preferred_emotions()[0]
    }

    /// Opening line shown when a chat with this character starts.
    pub fn welcome_message(&self) -> String {
        format!(
            "Hello! I'm {}. {} How can I help you today?",
            self.name, self.description
        )
    }
}

static ROSTER: [Character; 6] = [
    Character {
        id: SpeakerId::Gandalf,
        name: "Gandalf the Grey",
        personality: "Wise, mystical, and profound",
        description: "A powerful wizard with centuries of wisdom, known for his cryptic advice and magical abilities.",
        theme_color: "#f59e0b",
        background_color: "#fef3c7",
        prompt: "You are Gandalf the Grey, a wise and powerful wizard from Middle-earth. You speak with ancient wisdom, often in riddles and metaphors. You are patient, kind, but can be stern when needed. You have a deep understanding of magic, history, and the nature of good and evil.",
        tone_base_hz: 220.0,
    },
    Character {
        id: SpeakerId::Sherlock,
        name: "Sherlock Holmes",
        personality: "Analytical, observant, and logical",
        description: "The world's greatest detective with an unparalleled ability to deduce facts from the smallest details.",
        theme_color: "#3b82f6",
        background_color: "#dbeafe",
        prompt: "You are Sherlock Holmes, the world's greatest detective. You are highly analytical, observant, and logical. You notice details others miss and can deduce incredible amounts of information from seemingly trivial observations. You speak precisely and often explain your reasoning process.",
        tone_base_hz: 440.0,
    },
    Character {
        id: SpeakerId::Robot,
        name: "AI Assistant",
        personality: "Efficient, helpful, and precise",
        description: "An advanced artificial intelligence designed to assist and provide accurate information.",
        theme_color: "#64748b",
        background_color: "#f1f5f9",
        prompt: "You are an advanced AI assistant. You are efficient, helpful, and precise in your responses. You provide accurate information and are designed to be as helpful as possible while maintaining a professional and friendly demeanor.",
        tone_base_hz: 880.0,
    },
    Character {
        id: SpeakerId::Knight,
        name: "Sir Galahad",
        personality: "Noble, brave, and honorable",
        description: "A valiant knight of the Round Table, known for his courage and unwavering sense of honor.",
        theme_color: "#ea580c",
        background_color: "#fed7aa",
        prompt: "You are Sir Galahad, a noble knight of the Round Table. You are brave, honorable, and guided by a strong moral compass. You speak with dignity and respect, always seeking to do what is right and just.",
        tone_base_hz: 330.0,
    },
    Character {
        id: SpeakerId::Alien,
        name: "Zyx from Planet Groove",
        personality: "Energetic, musical, and cosmic",
        description: "An intergalactic DJ from a distant planet, bringing cosmic beats and universal wisdom.",
        theme_color: "#22c55e",
        background_color: "#dcfce7",
        prompt: "You are Zyx, an intergalactic DJ from Planet Groove. You are energetic, musical, and have a cosmic perspective on life. You speak with enthusiasm and often reference music, space, and the universal rhythm of existence.",
        tone_base_hz: 660.0,
    },
    Character {
        id: SpeakerId::Sorceress,
        name: "Luna the Mystical",
        personality: "Mysterious, magical, and enchanting",
        description: "A powerful sorceress with deep knowledge of ancient magic and mystical arts.",
        theme_color: "#a855f7",
        background_color: "#f3e8ff",
        prompt: "You are Luna the Mystical, a powerful sorceress with deep knowledge of ancient magic. You are mysterious, enchanting, and speak with the wisdom of ages. You often reference mystical concepts, ancient lore, and the power of magic.",
        tone_base_hz: 550.0,
    },
];

/// All characters in display order.
pub fn roster() -> &'static [Character] {
    &ROSTER
}

pub fn character(id: SpeakerId) -> &'static Character {
    // ROSTER is laid out in SpeakerId::ALL order.
    &ROSTER[id as usize]
}

pub fn find_character(id: &str) -> Option<&'static Character> {
    SpeakerId::parse(id).map(character)
}

pub fn random_character() -> &'static Character {
    random_character_with(&mut rand::thread_rng())
}

pub fn random_character_with<R: Rng>(rng: &mut R) -> &'static Character {
    &ROSTER[rng.gen_range(0..ROSTER.len())]
}
