//! Where character replies come from.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::character::Character;

/// Produces the character's next line in response to the user.
pub trait ReplySource {
    fn next_reply(&mut self, character: &Character, user_text: &str) -> String;
}

impl<F> ReplySource for F
where
    F: FnMut(&Character, &str) -> String,
{
    fn next_reply(&mut self, character: &Character, user_text: &str) -> String {
        self(character, user_text)
    }
}

pub const CANNED_REPLIES: [&str; 5] = [
    "That's very interesting! *nods thoughtfully*",
    "I see what you mean. *smiles warmly*",
    "Fascinating! *leans forward with interest*",
    "Ah, I understand now. *strokes beard*",
    "That's a wonderful question! *eyes light up*",
];

/// Picks a random line from [`CANNED_REPLIES`], ignoring the input.
#[derive(Debug, Clone)]
pub struct CannedReplies<R = StdRng> {
    rng: R,
}

impl CannedReplies<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for CannedReplies<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> CannedReplies<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ReplySource for CannedReplies<R> {
    fn next_reply(&mut self, _character: &Character, _user_text: &str) -> String {
        CANNED_REPLIES[self.rng.gen_range(0..CANNED_REPLIES.len())].to_string()
    }
}
