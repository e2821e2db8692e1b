//! One conversation with a roster character.
//!
//! The session owns the message list, the typewriter for the reply being
//! revealed and the portrait's displayed emotion. It is driven by three
//! calls: [`ChatSession::submit_user_message`] when the user sends,
//! [`ChatSession::deliver_reply`] once the "typing..." pause is over, and
//! [`ChatSession::tick`] from whatever timer the front end runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::replies::ReplySource;
use super::typewriter::{Typewriter, TypewriterEvent};
use crate::ai::display::{EmotionDisplay, EmotionTransition};
use crate::ai::emotion::{EmotionClassifier, EmotionTag};
use crate::character::{Character, SpeakerId};
use crate::config::EngineConfig;
use crate::sound::{Cue, CueKind, CueMixer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub emotion: Option<EmotionTag>,
    pub character_id: Option<SpeakerId>,
}

impl ChatMessage {
    fn user(text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text,
            sender: Sender::User,
            timestamp: Utc::now(),
            emotion: None,
            character_id: None,
        }
    }

    fn ai(text: String, emotion: EmotionTag, character: SpeakerId) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text,
            sender: Sender::Ai,
            timestamp: Utc::now(),
            emotion: Some(emotion),
            character_id: Some(character),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Message cannot be empty")]
    EmptyMessage,
    #[error("Message is {len} characters long, the limit is {max}")]
    MessageTooLong { len: usize, max: usize },
    #[error("Still waiting for the previous reply")]
    ReplyPending,
    #[error("No reply is pending")]
    NoPendingReply,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The typewriter finished showing an AI message.
    ReplyRevealed { message_id: String },
    EmotionChanged { transition: EmotionTransition },
    Cue { cue: Cue },
}

pub struct ChatSession {
    character: &'static Character,
    config: EngineConfig,
    classifier: EmotionClassifier<'static>,
    mixer: CueMixer,
    messages: Vec<ChatMessage>,
    awaiting_reply: bool,
    /// Reveal of the latest AI message, with that message's id.
    reveal: Option<(String, Typewriter)>,
    display: EmotionDisplay,
    events: Vec<SessionEvent>,
}

impl ChatSession {
    /// Start a chat, opening with the character's waving welcome line.
    pub fn new(character: &'static Character, config: EngineConfig) -> Self {
        let display =
            EmotionDisplay::new(config.emotion_reset_delay()).with_fade(config.image_fade());
        let mixer = CueMixer::new(config.sound_enabled, config.volume());
        let mut session = Self {
            character,
            config,
            classifier: EmotionClassifier::default(),
            mixer,
            messages: Vec::new(),
            awaiting_reply: false,
            reveal: None,
            display,
            events: Vec::new(),
        };
        tracing::info!("[Chat] Session started with {}", character.id);
        session.push_ai_message(character.welcome_message(), EmotionTag::Waving);
        session
    }

    pub fn character(&self) -> &'static Character {
        self.character
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True between a user message and its reply ("typing..." indicator).
    pub fn is_typing(&self) -> bool {
        self.awaiting_reply
    }

    pub fn displayed_emotion(&self) -> EmotionTag {
        self.display.current()
    }

    pub fn emotion_display(&self) -> &EmotionDisplay {
        &self.display
    }

    /// Visible part of the AI message currently being revealed, if any.
    pub fn revealing_text(&self) -> Option<&str> {
        self.reveal.as_ref().map(|(_, tw)| tw.visible_text())
    }

    pub fn is_revealing(&self) -> bool {
        self.reveal
            .as_ref()
            .is_some_and(|(_, tw)| tw.is_animating())
    }

    /// Cue for a keystroke in the input box. Silent while waiting on a reply.
    pub fn keystroke_cue(&self) -> Option<Cue> {
        if self.awaiting_reply {
            return None;
        }
        self.mixer.cue(CueKind::Keystroke, self.character)
    }

    pub fn submit_user_message(&mut self, text: &str) -> Result<&ChatMessage, ChatError> {
        if self.awaiting_reply {
            return Err(ChatError::ReplyPending);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let len = text.chars().count();
        let max = self.config.max_message_length;
        if len > max {
            return Err(ChatError::MessageTooLong { len, max });
        }

        self.queue_cue(CueKind::Send);
        self.queue_cue(CueKind::UserBubble);
        self.awaiting_reply = true;
        self.messages.push(ChatMessage::user(text.to_string()));
        tracing::debug!("[Chat] User message ({} chars)", len);
        Ok(self.last_message())
    }

    /// Produce, tag and start revealing the pending reply.
    pub fn deliver_reply<R: ReplySource + ?Sized>(
        &mut self,
        source: &mut R,
    ) -> Result<&ChatMessage, ChatError> {
        if !self.awaiting_reply {
            return Err(ChatError::NoPendingReply);
        }
        let user_text = self
            .messages
            .iter()
            .rev()
            .find(|m| m.sender == Sender::User)
            .map(|m| m.text.clone())
            .unwrap_or_default();

        let reply = source.next_reply(self.character, &user_text);
        let emotion = self.tag_reply(&reply);
        self.awaiting_reply = false;
        self.push_ai_message(reply, emotion);
        Ok(self.last_message())
    }

    fn tag_reply(&self, reply: &str) -> EmotionTag {
        let emotion = if self.config.personality_bias {
            self.classifier
                .preferred_for_speaker(reply, self.character.id)
        } else {
            self.classifier.classify(reply)
        };
        tracing::debug!(
            character = %self.character.id,
            emotion = %emotion,
            biased = self.config.personality_bias,
            "[Chat] Tagged reply"
        );
        emotion
    }

    fn push_ai_message(&mut self, text: String, emotion: EmotionTag) {
        let message = ChatMessage::ai(text, emotion, self.character.id);
        // A reply still being typed is shown in full once a newer one arrives.
        if let Some((id, mut previous)) = self.reveal.take() {
            if previous.finish() {
                self.events.push(SessionEvent::ReplyRevealed { message_id: id });
            }
        }
        self.reveal = Some((
            message.id.clone(),
            Typewriter::new(message.text.clone(), self.config.typing_interval()),
        ));
        if let Some(transition) = self.display.hold(emotion) {
            self.on_transition(transition);
        }
        self.messages.push(message);
    }

    /// Advance timers by `elapsed` and collect everything that happened.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<SessionEvent> {
        if let Some(transition) = self.display.tick(elapsed) {
            self.on_transition(transition);
        }

        let mut completed = None;
        if let Some((id, typewriter)) = self.reveal.as_mut() {
            if typewriter.advance(elapsed) == TypewriterEvent::Completed {
                completed = Some((id.clone(), typewriter.overrun()));
            }
        }
        if let Some((message_id, overrun)) = completed {
            self.on_revealed(message_id, overrun);
        }

        std::mem::take(&mut self.events)
    }

    /// Show the current reply in full right away.
    pub fn skip_reveal(&mut self) -> Vec<SessionEvent> {
        let mut completed = None;
        if let Some((id, typewriter)) = self.reveal.as_mut() {
            if typewriter.finish() {
                completed = Some(id.clone());
            }
        }
        if let Some(message_id) = completed {
            self.on_revealed(message_id, Duration::ZERO);
        }
        std::mem::take(&mut self.events)
    }

    /// `since` is how long ago the last character appeared.
    fn on_revealed(&mut self, message_id: String, since: Duration) {
        self.queue_cue(CueKind::AiBubble);
        self.events.push(SessionEvent::ReplyRevealed { message_id });
        // The emotion lingers for the reset delay once the text is complete.
        if let Some(transition) = self.display.release_since(since) {
            self.on_transition(transition);
        }
    }

    fn on_transition(&mut self, transition: EmotionTransition) {
        self.events.push(SessionEvent::EmotionChanged { transition });
        self.queue_cue(CueKind::Emotion(transition.to));
    }

    fn queue_cue(&mut self, kind: CueKind) {
        if let Some(cue) = self.mixer.cue(kind, self.character) {
            self.events.push(SessionEvent::Cue { cue });
        }
    }

    fn last_message(&self) -> &ChatMessage {
        // Only called right after a push.
        &self.messages[self.messages.len() - 1]
    }
}
