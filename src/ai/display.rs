//! Displayed emotion of the character portrait.
//!
//! The portrait switches to a reply's emotion right away and drifts back to
//! `neutral` once the reset delay has passed. A switch also starts a short
//! image cross-fade. Time is supplied by the caller through [`EmotionDisplay::tick`].

use serde::Serialize;
use std::time::Duration;

use super::emotion::EmotionTag;

pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(3000);
pub const DEFAULT_FADE: Duration = Duration::from_millis(150);

/// A change of the displayed emotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmotionTransition {
    pub from: EmotionTag,
    pub to: EmotionTag,
}

#[derive(Debug, Clone)]
pub struct EmotionDisplay {
    current: EmotionTag,
    reset_delay: Duration,
    /// Time left until the portrait returns to neutral.
    reset_in: Option<Duration>,
    fade: Duration,
    fade_left: Duration,
}

impl Default for EmotionDisplay {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_DELAY)
    }
}

impl EmotionDisplay {
    pub fn new(reset_delay: Duration) -> Self {
        Self {
            current: EmotionTag::Neutral,
            reset_delay,
            reset_in: None,
            fade: DEFAULT_FADE,
            fade_left: Duration::ZERO,
        }
    }

    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade = fade;
        self
    }

    /// Display `tag` until [`Self::release`] is called. Cancels any pending reset.
    pub fn hold(&mut self, tag: EmotionTag) -> Option<EmotionTransition> {
        self.reset_in = None;
        self.switch_to(tag)
    }

    /// Start the countdown back to neutral.
    pub fn release(&mut self) {
        if self.current != EmotionTag::Neutral {
            self.reset_in = Some(self.reset_delay);
        }
    }

    /// Start the countdown as if [`Self::release`] had been called `ago`
    /// earlier. Fires the reset right away if that is already past.
    pub fn release_since(&mut self, ago: Duration) -> Option<EmotionTransition> {
        self.release();
        self.count_down(ago)
    }

    /// Display `tag` and schedule the automatic reset.
    pub fn show(&mut self, tag: EmotionTag) -> Option<EmotionTransition> {
        let transition = self.hold(tag);
        self.release();
        transition
    }

    pub fn tick(&mut self, elapsed: Duration) -> Option<EmotionTransition> {
        self.fade_left = self.fade_left.saturating_sub(elapsed);
        self.count_down(elapsed)
    }

    fn count_down(&mut self, elapsed: Duration) -> Option<EmotionTransition> {
        let left = self.reset_in?;
        if elapsed < left {
            self.reset_in = Some(left - elapsed);
            return None;
        }

        self.reset_in = None;
        let transition = self.switch_to(EmotionTag::Neutral);
        if transition.is_some() {
            // The fade began when the reset fired, part-way through this tick.
            self.fade_left = self.fade.saturating_sub(elapsed - left);
        }
        transition
    }

    fn switch_to(&mut self, tag: EmotionTag) -> Option<EmotionTransition> {
        if tag == self.current {
            return None;
        }
        let transition = EmotionTransition {
            from: self.current,
            to: tag,
        };
        self.current = tag;
        self.fade_left = self.fade;
        tracing::debug!(from = %transition.from, to = %transition.to, "portrait emotion changed");
        Some(transition)
    }

    pub fn current(&self) -> EmotionTag {
        self.current
    }

    /// Whether the emotion ring around the portrait is lit.
    pub fn shows_ring(&self) -> bool {
        self.current != EmotionTag::Neutral
    }

    pub fn is_fading(&self) -> bool {
        !self.fade_left.is_zero()
    }

    pub fn pending_reset(&self) -> Option<Duration> {
        self.reset_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn starts_neutral() {
        let display = EmotionDisplay::default();
        assert_eq!(display.current(), EmotionTag::Neutral);
        assert!(!display.shows_ring());
        assert!(!display.is_fading());
    }

    #[test]
    fn show_switches_immediately_and_resets_later() {
        let mut display = EmotionDisplay::new(ms(3000));
        let t = display.show(EmotionTag::Happy).unwrap();
        assert_eq!(t.from, EmotionTag::Neutral);
        assert_eq!(t.to, EmotionTag::Happy);
        assert!(display.shows_ring());

        assert_eq!(display.tick(ms(2999)), None);
        assert_eq!(display.current(), EmotionTag::Happy);

        let reset = display.tick(ms(1)).unwrap();
        assert_eq!(reset.to, EmotionTag::Neutral);
        assert_eq!(display.current(), EmotionTag::Neutral);
        assert_eq!(display.pending_reset(), None);
    }

    #[test]
    fn new_emotion_restarts_the_countdown() {
        let mut display = EmotionDisplay::new(ms(3000));
        display.show(EmotionTag::Happy);
        display.tick(ms(2000));
        display.show(EmotionTag::Sad);
        assert_eq!(display.tick(ms(2000)), None);
        assert_eq!(display.current(), EmotionTag::Sad);
        assert!(display.tick(ms(1000)).is_some());
    }

    #[test]
    fn neutral_schedules_nothing() {
        let mut display = EmotionDisplay::default();
        assert_eq!(display.show(EmotionTag::Neutral), None);
        assert_eq!(display.pending_reset(), None);
    }

    #[test]
    fn same_emotion_is_not_a_transition() {
        let mut display = EmotionDisplay::default();
        display.show(EmotionTag::Waving);
        assert_eq!(display.show(EmotionTag::Waving), None);
        assert_eq!(display.pending_reset(), Some(DEFAULT_RESET_DELAY));
    }

    #[test]
    fn hold_waits_for_release() {
        let mut display = EmotionDisplay::new(ms(100));
        display.hold(EmotionTag::Thinking);
        assert_eq!(display.tick(ms(10_000)), None);
        assert_eq!(display.current(), EmotionTag::Thinking);

        display.release();
        assert!(display.tick(ms(100)).is_some());
        assert_eq!(display.current(), EmotionTag::Neutral);
    }

    #[test]
    fn hold_cancels_pending_reset() {
        let mut display = EmotionDisplay::new(ms(100));
        display.show(EmotionTag::Happy);
        display.hold(EmotionTag::Surprised);
        assert_eq!(display.tick(ms(500)), None);
        assert_eq!(display.current(), EmotionTag::Surprised);
    }

    #[test]
    fn late_release_counts_from_the_past() {
        let mut display = EmotionDisplay::new(ms(3000)).with_fade(ms(150));
        display.hold(EmotionTag::Happy);
        assert_eq!(display.release_since(ms(1000)), None);
        assert_eq!(display.pending_reset(), Some(ms(2000)));

        display.hold(EmotionTag::Sad);
        let reset = display.release_since(ms(3100)).unwrap();
        assert_eq!(reset.to, EmotionTag::Neutral);
        assert_eq!(display.pending_reset(), None);
        // The fade began 100ms ago.
        display.tick(ms(50));
        assert!(!display.is_fading());
    }

    #[test]
    fn switch_starts_a_fade() {
        let mut display = EmotionDisplay::default().with_fade(ms(150));
        display.show(EmotionTag::Happy);
        assert!(display.is_fading());
        display.tick(ms(100));
        assert!(display.is_fading());
        display.tick(ms(50));
        assert!(!display.is_fading());
    }

    #[test]
    fn reset_fade_starts_mid_tick() {
        let mut display = EmotionDisplay::new(ms(100)).with_fade(ms(150));
        display.show(EmotionTag::Happy);
        // Reset fires 100ms into this tick, leaving 50ms of fade.
        display.tick(ms(200));
        assert_eq!(display.current(), EmotionTag::Neutral);
        assert!(display.is_fading());
        display.tick(ms(50));
        assert!(!display.is_fading());
    }
}
