//! Keyword-based emotion tagging for character replies.
//!
//! A reply is scored against one keyword list per emotion and tagged with the
//! best-scoring emotion, falling back to `neutral` when nothing matches.
//! Everything here is a pure function over an immutable [`EmotionLexicon`],
//! so the built-in lexicon can be shared freely across threads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::character::SpeakerId;

// ── Emotion Tag ────────────────────────────────────────────

/// One discrete mood label attached to a message for display purposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionTag {
    #[default]
    Neutral,
    Happy,
    Thinking,
    Sad,
    Waving,
    Surprised,
}

impl EmotionTag {
    pub const ALL: [EmotionTag; 6] = [
        EmotionTag::Neutral,
        EmotionTag::Happy,
        EmotionTag::Thinking,
        EmotionTag::Sad,
        EmotionTag::Waving,
        EmotionTag::Surprised,
    ];

    /// Tags that carry keywords, in scoring order. Earlier tags win ties.
    pub const SCORED: [EmotionTag; 5] = [
        EmotionTag::Happy,
        EmotionTag::Thinking,
        EmotionTag::Sad,
        EmotionTag::Waving,
        EmotionTag::Surprised,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionTag::Neutral => "neutral",
            EmotionTag::Happy => "happy",
            EmotionTag::Thinking => "thinking",
            EmotionTag::Sad => "sad",
            EmotionTag::Waving => "waving",
            EmotionTag::Surprised => "surprised",
        }
    }

    /// Parse a tag name, ignoring case and surrounding whitespace.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(name))
    }

    /// Position in [`EmotionTag::SCORED`], `None` for neutral.
    fn slot(self) -> Option<usize> {
        Self::SCORED.iter().position(|tag| *tag == self)
    }
}

impl fmt::Display for EmotionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Keyword sets ───────────────────────────────────────────

const HAPPY_KW: &[&str] = &[
    "happy",
    "joy",
    "excited",
    "great",
    "wonderful",
    "amazing",
    "fantastic",
    "smile",
    "laugh",
    "cheerful",
    "delighted",
    "pleased",
    "thrilled",
    "excellent",
    "brilliant",
    "awesome",
    "perfect",
    "love",
    "adore",
];

const THINKING_KW: &[&str] = &[
    "think",
    "consider",
    "ponder",
    "reflect",
    "analyze",
    "examine",
    "wonder",
    "question",
    "curious",
    "investigate",
    "study",
    "research",
    "hmm",
    "let me think",
    "interesting",
    "fascinating",
    "complex",
];

const SAD_KW: &[&str] = &[
    "sad",
    "sorry",
    "unfortunate",
    "disappointed",
    "regret",
    "mourn",
    "grief",
    "sorrow",
    "melancholy",
    "depressed",
    "down",
    "upset",
    "tragic",
    "heartbreaking",
    "devastated",
    "cry",
    "tears",
];

const WAVING_KW: &[&str] = &[
    "hello",
    "hi",
    "greetings",
    "welcome",
    "goodbye",
    "farewell",
    "see you",
    "until next time",
    "take care",
    "wave",
    "gesture",
];

const SURPRISED_KW: &[&str] = &[
    "wow",
    "oh",
    "really",
    "surprised",
    "shocked",
    "amazed",
    "astonished",
    "incredible",
    "unbelievable",
    "no way",
    "what",
    "gasp",
    "stunned",
];

// Intensity uses a shorter, stronger subset of each list.
const HAPPY_INTENSITY_KW: &[&str] = &[
    "happy",
    "joy",
    "excited",
    "great",
    "wonderful",
    "amazing",
    "fantastic",
    "smile",
    "laugh",
    "cheerful",
];

const THINKING_INTENSITY_KW: &[&str] = &[
    "think", "consider", "ponder", "reflect", "analyze", "examine", "wonder", "question",
    "curious",
];

const SAD_INTENSITY_KW: &[&str] = &[
    "sad",
    "sorry",
    "unfortunate",
    "disappointed",
    "regret",
    "mourn",
    "grief",
    "sorrow",
];

const WAVING_INTENSITY_KW: &[&str] = &[
    "hello",
    "hi",
    "greetings",
    "welcome",
    "goodbye",
    "farewell",
    "see you",
    "wave",
];

const SURPRISED_INTENSITY_KW: &[&str] = &[
    "wow",
    "oh",
    "really",
    "surprised",
    "shocked",
    "amazed",
    "astonished",
    "incredible",
];

/// Preference list used for speakers without a profile.
pub const DEFAULT_PREFERENCES: &[EmotionTag] = &[EmotionTag::Neutral];

// ── Keyword Table ──────────────────────────────────────────

/// Lowercase trigger substrings for each non-neutral emotion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTable {
    lists: [Vec<String>; 5],
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the keyword list for `tag`. Keywords are lowercased so they
    /// can be matched against lowercased text. Neutral has no keywords and
    /// is left untouched.
    pub fn with_keywords<S: AsRef<str>>(mut self, tag: EmotionTag, keywords: &[S]) -> Self {
        if let Some(slot) = tag.slot() {
            self.lists[slot] = keywords
                .iter()
                .map(|kw| kw.as_ref().to_lowercase())
                .collect();
        }
        self
    }

    pub fn keywords(&self, tag: EmotionTag) -> &[String] {
        match tag.slot() {
            Some(slot) => &self.lists[slot],
            None => &[],
        }
    }

    /// Number of distinct keywords of `tag` contained in already-lowercased text.
    pub fn count_matches(&self, lowered: &str, tag: EmotionTag) -> usize {
        self.keywords(tag)
            .iter()
            .filter(|kw| lowered.contains(kw.as_str()))
            .count()
    }
}

/// The pair of keyword tables the classifier works from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionLexicon {
    /// Scored by [`EmotionClassifier::classify`].
    pub detection: KeywordTable,
    /// Scored by [`EmotionClassifier::intensity`].
    pub intensity: KeywordTable,
}

impl EmotionLexicon {
    /// Lexicon whose detection and intensity tables are the same.
    pub fn uniform(table: KeywordTable) -> Self {
        Self {
            detection: table.clone(),
            intensity: table,
        }
    }

    /// The built-in English lexicon, constructed on first use.
    pub fn builtin() -> &'static EmotionLexicon {
        static BUILTIN: OnceLock<EmotionLexicon> = OnceLock::new();
        BUILTIN.get_or_init(|| EmotionLexicon {
            detection: KeywordTable::new()
                .with_keywords(EmotionTag::Happy, HAPPY_KW)
                .with_keywords(EmotionTag::Thinking, THINKING_KW)
                .with_keywords(EmotionTag::Sad, SAD_KW)
                .with_keywords(EmotionTag::Waving, WAVING_KW)
                .with_keywords(EmotionTag::Surprised, SURPRISED_KW),
            intensity: KeywordTable::new()
                .with_keywords(EmotionTag::Happy, HAPPY_INTENSITY_KW)
                .with_keywords(EmotionTag::Thinking, THINKING_INTENSITY_KW)
                .with_keywords(EmotionTag::Sad, SAD_INTENSITY_KW)
                .with_keywords(EmotionTag::Waving, WAVING_INTENSITY_KW)
                .with_keywords(EmotionTag::Surprised, SURPRISED_INTENSITY_KW),
        })
    }
}

// ── Scores ─────────────────────────────────────────────────

/// Per-emotion keyword match counts for one piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmotionScores {
    counts: [usize; 5],
}

impl EmotionScores {
    pub fn get(&self, tag: EmotionTag) -> usize {
        tag.slot().map_or(0, |slot| self.counts[slot])
    }

    /// (tag, count) pairs in scoring order.
    pub fn iter(&self) -> impl Iterator<Item = (EmotionTag, usize)> + '_ {
        EmotionTag::SCORED.into_iter().zip(self.counts.iter().copied())
    }

    /// Highest-scoring tag. Ties keep the earliest tag in scoring order;
    /// an all-zero score is neutral.
    pub fn winner(&self) -> EmotionTag {
        let mut best = (EmotionTag::Neutral, 0);
        for (tag, count) in self.iter() {
            if count > best.1 {
                best = (tag, count);
            }
        }
        best.0
    }
}

// ── Classifier ─────────────────────────────────────────────

/// Assigns exactly one [`EmotionTag`] to a piece of text.
#[derive(Debug, Clone, Copy)]
pub struct EmotionClassifier<'a> {
    lexicon: &'a EmotionLexicon,
}

impl Default for EmotionClassifier<'static> {
    fn default() -> Self {
        Self::new(EmotionLexicon::builtin())
    }
}

impl<'a> EmotionClassifier<'a> {
    pub fn new(lexicon: &'a EmotionLexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &'a EmotionLexicon {
        self.lexicon
    }

    /// Count detection keyword matches for every emotion.
    pub fn scores(&self, text: &str) -> EmotionScores {
        let lowered = text.to_lowercase();
        let mut scores = EmotionScores::default();
        for (slot, tag) in EmotionTag::SCORED.into_iter().enumerate() {
            scores.counts[slot] = self.lexicon.detection.count_matches(&lowered, tag);
        }
        scores
    }

    pub fn classify(&self, text: &str) -> EmotionTag {
        let scores = self.scores(text);
        let tag = scores.winner();
        tracing::trace!(emotion = %tag, ?scores, "classified text");
        tag
    }

    /// Fraction of `tag`'s intensity keywords present in `text`, in [0, 1].
    pub fn intensity(&self, text: &str, tag: EmotionTag) -> f32 {
        let keywords = self.lexicon.intensity.keywords(tag);
        if keywords.is_empty() {
            return 0.0;
        }
        let lowered = text.to_lowercase();
        let matches = self.lexicon.intensity.count_matches(&lowered, tag);
        (matches as f32 / keywords.len() as f32).min(1.0)
    }

    /// Classify, then narrow the result to the emotions `preferences` allows.
    ///
    /// A detected emotion outside the list is replaced by the list's first
    /// entry. An empty list behaves like [`DEFAULT_PREFERENCES`].
    pub fn preferred(&self, text: &str, preferences: &[EmotionTag]) -> EmotionTag {
        let preferences = if preferences.is_empty() {
            DEFAULT_PREFERENCES
        } else {
            preferences
        };
        let detected = self.classify(text);
        if preferences.contains(&detected) {
            detected
        } else {
            preferences[0]
        }
    }

    pub fn preferred_for_speaker(&self, text: &str, speaker: SpeakerId) -> EmotionTag {
        self.preferred(text, speaker.preferred_emotions())
    }

    /// Same as [`Self::preferred_for_speaker`], keyed by the raw id string.
    /// Unknown ids use [`DEFAULT_PREFERENCES`].
    pub fn preferred_for_speaker_id(&self, text: &str, speaker_id: &str) -> EmotionTag {
        match SpeakerId::parse(speaker_id) {
            Some(speaker) => self.preferred_for_speaker(text, speaker),
            None => self.preferred(text, DEFAULT_PREFERENCES),
        }
    }
}

/// Classify `text` with the built-in lexicon.
pub fn classify(text: &str) -> EmotionTag {
    EmotionClassifier::default().classify(text)
}

/// Emotion intensity of `text` for `tag` with the built-in lexicon.
pub fn intensity(text: &str, tag: EmotionTag) -> f32 {
    EmotionClassifier::default().intensity(text, tag)
}

pub fn preferred_for_speaker(text: &str, speaker: SpeakerId) -> EmotionTag {
    EmotionClassifier::default().preferred_for_speaker(text, speaker)
}

pub fn preferred_for_speaker_id(text: &str, speaker_id: &str) -> EmotionTag {
    EmotionClassifier::default().preferred_for_speaker_id(text, speaker_id)
}

// ── Tests ──────────────────────────────────────────────────
