//! End-to-end conversation with canned replies, driven by a fake clock.

use std::time::Duration;

use roleplay_chat_engine_lib::ai::emotion::classify;
use roleplay_chat_engine_lib::chat::{CannedReplies, CANNED_REPLIES};
use roleplay_chat_engine_lib::character::character;
use roleplay_chat_engine_lib::speech::{extract_speech_text, strip_asterisks};
use roleplay_chat_engine_lib::{
    ChatSession, EmotionTag, EngineConfig, SessionEvent, SpeakerId,
};

fn run_until_revealed(session: &mut ChatSession, step: Duration) -> Vec<SessionEvent> {
    let mut all = Vec::new();
    for _ in 0..10_000 {
        all.extend(session.tick(step));
        if !session.is_revealing() {
            return all;
        }
    }
    panic!("reveal never finished");
}

#[test]
fn full_conversation_with_canned_replies() {
    let config = EngineConfig {
        sound_enabled: false,
        ..EngineConfig::default()
    };
    let step = config.typing_interval();
    let mut session = ChatSession::new(character(SpeakerId::Sherlock), config);
    let mut replies = CannedReplies::seeded(2024);

    run_until_revealed(&mut session, step);

    for turn in 0..5 {
        session
            .submit_user_message(&format!("Question number {}", turn))
            .unwrap();
        let reply = session.deliver_reply(&mut replies).unwrap().clone();

        assert!(CANNED_REPLIES.contains(&reply.text.as_str()));
        assert_eq!(reply.emotion, Some(classify(&reply.text)));
        assert_eq!(session.displayed_emotion(), classify(&reply.text));

        let events = run_until_revealed(&mut session, step);
        assert!(events.contains(&SessionEvent::ReplyRevealed {
            message_id: reply.id.clone()
        }));
        assert_eq!(session.revealing_text(), Some(reply.text.as_str()));

        // Every canned line narrates an action worth speaking.
        let spoken = extract_speech_text(&reply.text).unwrap();
        assert!(!spoken.contains('*'));
        assert!(strip_asterisks(&reply.text).ends_with(&spoken));

        // Let the portrait settle before the next turn.
        session.tick(Duration::from_millis(3000));
        assert_eq!(session.displayed_emotion(), EmotionTag::Neutral);
    }

    // Welcome + 5 user messages + 5 replies.
    assert_eq!(session.messages().len(), 11);
}

#[test]
fn biased_session_stays_in_character() {
    let config = EngineConfig {
        sound_enabled: false,
        personality_bias: true,
        ..EngineConfig::default()
    };
    for speaker in SpeakerId::ALL {
        let mut session = ChatSession::new(character(speaker), config.clone());
        let mut replies = CannedReplies::seeded(speaker as u64);
        for _ in 0..5 {
            session.submit_user_message("Tell me something").unwrap();
            let reply = session.deliver_reply(&mut replies).unwrap();
            let emotion = reply.emotion.unwrap();
            assert!(
                speaker.preferred_emotions().contains(&emotion),
                "{} showed {}",
                speaker,
                emotion
            );
        }
    }
}
