//! Typewriter reveal for character replies.
//!
//! Replies appear one character at a time at a fixed interval, with a cursor
//! shown while the reveal runs. The reveal is driven by elapsed time passed
//! in by the caller, so it works the same under a real timer and in tests.

use serde::Serialize;
use std::time::Duration;

/// Default reveal speed: one character every 30 ms.
pub const DEFAULT_CHAR_INTERVAL: Duration = Duration::from_millis(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypewriterEvent {
    /// Nothing new became visible.
    Idle,
    /// More characters became visible; `revealed` is the running total.
    Progress { revealed: usize },
    /// The last character became visible. Emitted once.
    Completed,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    char_count: usize,
    revealed: usize,
    interval: Duration,
    /// Elapsed time not yet spent on a whole character.
    carry_ns: u128,
    /// Part of the completing advance that came after the last character.
    overrun: Duration,
    completed: bool,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, interval: Duration) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            text,
            char_count,
            revealed: 0,
            interval,
            carry_ns: 0,
            overrun: Duration::ZERO,
            completed: false,
        }
    }

    /// Fully visible from the start. Used for the user's own messages.
    pub fn instant(text: impl Into<String>) -> Self {
        let mut typewriter = Self::new(text, Duration::ZERO);
        typewriter.revealed = typewriter.char_count;
        typewriter.completed = true;
        typewriter
    }

    pub fn advance(&mut self, elapsed: Duration) -> TypewriterEvent {
        if self.completed {
            return TypewriterEvent::Idle;
        }

        let remaining = self.char_count - self.revealed;
        let step_ns = self.interval.as_nanos();
        let steps = if step_ns == 0 {
            remaining
        } else {
            self.carry_ns += elapsed.as_nanos();
            let whole = (self.carry_ns / step_ns).min(remaining as u128);
            self.carry_ns -= whole * step_ns;
            whole as usize
        };

        self.revealed += steps;
        if self.revealed == self.char_count {
            self.completed = true;
            self.overrun = if step_ns == 0 {
                elapsed
            } else {
                Duration::from_nanos(u64::try_from(self.carry_ns).unwrap_or(u64::MAX))
            };
            self.carry_ns = 0;
            TypewriterEvent::Completed
        } else if steps > 0 {
            TypewriterEvent::Progress {
                revealed: self.revealed,
            }
        } else {
            TypewriterEvent::Idle
        }
    }

    /// Reveal the rest immediately. Returns `true` if this call completed
    /// the reveal.
    pub fn finish(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.revealed = self.char_count;
        self.completed = true;
        self.carry_ns = 0;
        true
    }

    pub fn visible_text(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.revealed)
            .map_or(self.text.len(), |(idx, _)| idx);
        &self.text[..end]
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }

    pub fn revealed_chars(&self) -> usize {
        self.revealed
    }

    /// Whether the reveal (and its cursor) is still running.
    pub fn is_animating(&self) -> bool {
        !self.completed
    }

    /// Time left over from the advance that completed the reveal, measured
    /// from the moment the last character appeared. Zero after [`Self::finish`].
    pub fn overrun(&self) -> Duration {
        self.overrun
    }

    /// Saturates at `Duration::MAX`.
    pub fn total_duration(&self) -> Duration {
        u32::try_from(self.char_count)
            .ok()
            .and_then(|count| self.interval.checked_mul(count))
            .unwrap_or(Duration::MAX)
    }
}
