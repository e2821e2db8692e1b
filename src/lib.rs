pub mod ai;
pub mod character;
pub mod chat;
pub mod config;
pub mod sound;
pub mod speech;

pub use ai::display::{EmotionDisplay, EmotionTransition};
pub use ai::emotion::{
    classify, intensity, preferred_for_speaker, preferred_for_speaker_id, EmotionClassifier,
    EmotionLexicon, EmotionTag, KeywordTable,
};
pub use character::{find_character, roster, Character, SpeakerId};
pub use chat::{ChatError, ChatMessage, ChatSession, SessionEvent};
pub use config::EngineConfig;

/// Install the `tracing` subscriber used by the binary.
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
