//! Typewriter state machine
//!
//! One `Typewriter` drives one target. It knows nothing about the DOM or
//! about clocks: the host hands it timestamps in milliseconds and applies
//! the returned `Frame`.
//!
//! ```text
//! Typing ──full──▶ Holding ──hold elapsed──▶ Deleting ──empty──▶ Typing (next phrase)
//!                     │                                   │
//!                     └─ last phrase, no loop ─▶ Finished ◀┘ (no next phrase, no loop)
//! ```

use crate::engine::tokens::FullText;
use crate::models::{EngineState, Phase, TargetConfig};

/// What the host should do after one step
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// New text content, `None` when unchanged
    pub text: Option<String>,
    pub cursor_visible: bool,
    /// Whether another animation step should be scheduled
    pub schedule_next: bool,
}

/// Characters to move in one step: at least one, so slow speeds never stall.
/// Products beyond `usize` (including infinity) saturate.
pub fn chars_for(dt_ms: f64, chars_per_second: f64) -> usize {
    let exact = (dt_ms / 1000.0 * chars_per_second).floor();
    if exact.is_nan() || exact < 1.0 {
        1
    } else if exact >= usize::MAX as f64 {
        usize::MAX
    } else {
        exact as usize
    }
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    config: TargetConfig,
    texts: Vec<FullText>,
    state: EngineState,
    running: bool,
    reduced_motion: bool,
}

impl Typewriter {
    pub fn new(config: TargetConfig, reduced_motion: bool) -> Self {
        let texts = config
            .rendered_phrases()
            .map(|full| FullText::new(&full, &config.protected_tokens))
            .collect();

        Self {
            config,
            texts,
            state: EngineState::new(),
            running: false,
            reduced_motion,
        }
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// No phrases configured: `start` never does anything
    pub fn is_inert(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn can_animate(&self) -> bool {
        !self.reduced_motion && !self.is_inert() && !self.state.is_finished()
    }

    /// Begin ticking from `now`. Returns true only when the engine was
    /// stopped and is now running; a running engine is left untouched.
    pub fn start(&mut self, now: f64) -> bool {
        if self.running || !self.can_animate() {
            return false;
        }
        self.running = true;
        self.state.last_tick = now;
        true
    }

    /// Stop ticking without touching progress. Returns whether it was running.
    pub fn pause(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    /// Reset progress to the first phrase
    pub fn rewind(&mut self) {
        self.state.rewind();
    }

    pub fn cursor_visible(&self) -> bool {
        if self.reduced_motion {
            return false;
        }
        !(self.config.hide_cursor_while_delete && self.state.deleting())
    }

    /// Text currently revealed
    pub fn current_text(&self) -> String {
        self.texts
            .get(self.state.phrase_index)
            .map(|full| full.slice(self.state.char_index))
            .unwrap_or_default()
    }

    /// Reveal the whole current phrase at once
    pub fn render_full(&mut self) -> String {
        let Some(full) = self.texts.get(self.state.phrase_index) else {
            return String::new();
        };
        self.state.char_index = full.len();
        if !self.state.is_finished() {
            self.state.phase = Phase::default();
        }
        full.to_full_string()
    }

    /// Advance using the time elapsed since the previous tick
    pub fn tick(&mut self, now: f64) -> Frame {
        if !self.running {
            return self.idle_frame();
        }
        let dt = (now - self.state.last_tick).max(0.0);
        self.state.last_tick = now;
        self.step(dt)
    }

    /// Advance by `dt_ms` regardless of wall-clock bookkeeping
    pub fn step(&mut self, dt_ms: f64) -> Frame {
        let count = self.texts.len();
        let Some(full) = self.texts.get(self.state.phrase_index) else {
            self.running = false;
            return self.idle_frame();
        };
        let index = self.state.char_index;

        let text = match self.state.phase {
            Phase::Typing => {
                let step = chars_for(dt_ms, self.config.typing_speed);
                let naive = index.saturating_add(step).min(full.len());
                let mut cut = full.retract(naive);
                if cut <= index {
                    // Retracting would undo this step; reveal the whole token instead
                    cut = full.extend(naive);
                }
                self.state.char_index = cut;

                if cut >= full.len() {
                    let pause = cut
                        .checked_sub(1)
                        .and_then(|last| full.char_at(last))
                        .map(|ch| self.config.punctuation_pause_for(ch))
                        .unwrap_or(0.0);
                    self.state.phase = Phase::Holding {
                        remaining_ms: self.config.hold_ms + pause,
                    };
                }
                Some(full.slice(cut))
            }
            Phase::Holding { remaining_ms } => {
                let left = remaining_ms - dt_ms;
                self.state.phase = if left > 0.0 {
                    Phase::Holding { remaining_ms: left }
                } else if self.config.looping || self.state.phrase_index + 1 < count {
                    Phase::Deleting
                } else {
                    log::debug!("typewriter finished on phrase {}", self.state.phrase_index);
                    self.running = false;
                    Phase::Finished
                };
                None
            }
            Phase::Deleting => {
                let naive = index.saturating_sub(chars_for(dt_ms, self.config.delete_speed));
                let cut = full.retract(naive);
                self.state.char_index = cut;
                let text = full.slice(cut);

                if cut == 0 {
                    if self.state.phrase_index + 1 < count {
                        self.state.phrase_index += 1;
                        self.state.phase = Phase::default();
                    } else if self.config.looping {
                        self.state.phrase_index = 0;
                        self.state.phase = Phase::default();
                    } else {
                        self.running = false;
                        self.state.phase = Phase::Finished;
                    }
                }
                Some(text)
            }
            Phase::Finished => {
                self.running = false;
                None
            }
        };

        Frame {
            text,
            cursor_visible: self.cursor_visible(),
            schedule_next: self.running,
        }
    }

    fn idle_frame(&self) -> Frame {
        Frame {
            text: None,
            cursor_visible: self.cursor_visible(),
            schedule_next: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chars_for_never_below_one() {
        assert_eq!(chars_for(0.0, 16.0), 1);
        assert_eq!(chars_for(10.0, 16.0), 1);
        assert_eq!(chars_for(1000.0, 16.0), 16);
        assert_eq!(chars_for(f64::NAN, 16.0), 1);
    }

    #[test]
    fn test_chars_for_saturates_on_huge_rates() {
        assert_eq!(chars_for(16.0, 1e30), usize::MAX);
        assert_eq!(chars_for(16.0, f64::INFINITY), usize::MAX);
        assert_eq!(chars_for(0.0, f64::INFINITY), 1);
    }

    #[test]
    fn test_inert_without_phrases() {
        let mut machine = Typewriter::new(TargetConfig::default(), false);
        assert!(machine.is_inert());
        assert!(!machine.start(0.0));
        assert!(!machine.is_running());
        assert_eq!(machine.render_full(), "");
    }

    #[test]
    fn test_reduced_motion_never_runs() {
        let config = TargetConfig {
            phrases: vec!["hello".into()],
            ..TargetConfig::default()
        };
        let mut machine = Typewriter::new(config, true);
        assert!(!machine.start(0.0));
        assert!(!machine.cursor_visible());
        assert_eq!(machine.render_full(), "hello");
    }

    #[test]
    fn test_tick_while_paused_is_idle() {
        let config = TargetConfig {
            phrases: vec!["hello".into()],
            ..TargetConfig::default()
        };
        let mut machine = Typewriter::new(config, false);
        let frame = machine.tick(500.0);
        assert_eq!(frame.text, None);
        assert!(!frame.schedule_next);
        assert_eq!(machine.state().char_index, 0);
    }
}
