//! Engine progress state
//!
//! `EngineState` is owned by exactly one `Typewriter` and is only mutated
//! inside its step function. Pausing never touches it, which is what makes
//! every engine resumable.

use serde::Serialize;

/// Active sub-state of the typing cycle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Phase {
    /// Revealing characters
    #[default]
    Typing,
    /// Full string on display, counting down before deletion
    Holding { remaining_ms: f64 },
    /// Removing characters
    Deleting,
    /// Last phrase typed and held with looping off; nothing left to do
    Finished,
}

/// Mutable progress of one engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineState {
    /// Index into the configured phrases
    pub phrase_index: usize,
    /// Characters of the full string currently revealed
    pub char_index: usize,
    pub phase: Phase,
    /// Timestamp (ms) of the previous step
    pub last_tick: f64,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn typing(&self) -> bool {
        matches!(self.phase, Phase::Typing)
    }

    pub fn holding(&self) -> bool {
        matches!(self.phase, Phase::Holding { .. })
    }

    pub fn deleting(&self) -> bool {
        matches!(self.phase, Phase::Deleting)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Back to the first character of the first phrase
    pub fn rewind(&mut self) {
        self.phrase_index = 0;
        self.char_index = 0;
        self.phase = Phase::default();
    }
}

/// Read-only view of one engine, returned by `getState`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub key: String,
    pub running: bool,
    pub phrase_index: usize,
    pub char_index: usize,
    pub deleting: bool,
}
