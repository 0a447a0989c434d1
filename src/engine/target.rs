//! A bound target: state machine + visibility gate + presentation surface
//!
//! `Target` holds every decision the host has to make about one animated
//! element. The host (the DOM binding, or a test) feeds it events and
//! timestamps and acts on the returned `HostAction`; it never looks at the
//! engine state directly.

use crate::engine::gate::{GateChange, VisibilityGate};
use crate::engine::typewriter::Typewriter;
use crate::engine::width::locked_min_width;
use crate::models::{AllowWrap, EngineSnapshot, EngineState, TargetConfig};

/// Presentation side of a target
pub trait Surface {
    fn render_text(&mut self, text: &str);
    fn set_cursor(&mut self, visible: bool);
    fn lock_width(&mut self, min_width_px: f64);
    fn set_wrap(&mut self, wrap: AllowWrap);
    /// Rendered width of `text` in the element's current font, in pixels
    fn measure_text(&self, text: &str) -> f64;
}

/// Facts about the host captured once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    pub reduced_motion: bool,
    pub page_visible: bool,
    /// Both frame scheduling and intersection observation are available
    pub can_animate: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            page_visible: true,
            can_animate: true,
        }
    }
}

/// What the host must do with its pending animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    RequestFrame,
    CancelFrame,
    Idle,
}

pub struct Target<S> {
    key: String,
    machine: Typewriter,
    gate: VisibilityGate,
    surface: S,
    env: Environment,
    connected: bool,
    printing: bool,
}

impl<S: Surface> Target<S> {
    /// Build the target and prepare its surface (width lock, wrap hint,
    /// initial cursor) before any tick happens
    pub fn new(key: impl Into<String>, config: TargetConfig, mut surface: S, env: Environment) -> Self {
        let key = key.into();

        if config.width_lock && !config.phrases.is_empty() {
            let widths: Vec<f64> = config
                .rendered_phrases()
                .map(|text| surface.measure_text(&text))
                .collect();
            match locked_min_width(widths) {
                Some(px) => surface.lock_width(px),
                None => log::debug!("width lock skipped for '{}': nothing measurable", key),
            }
        }

        surface.set_wrap(config.allow_wrap);
        surface.set_cursor(!env.reduced_motion);

        Self {
            key,
            machine: Typewriter::new(config, env.reduced_motion),
            gate: VisibilityGate::new(env.page_visible),
            surface,
            env,
            connected: false,
            printing: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn state(&self) -> &EngineState {
        self.machine.state()
    }

    pub fn config(&self) -> &TargetConfig {
        self.machine.config()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_running(&self) -> bool {
        self.machine.is_running()
    }

    pub fn gate(&self) -> &VisibilityGate {
        &self.gate
    }

    /// Whether the host should subscribe to viewport and page signals
    pub fn wants_signals(&self) -> bool {
        self.env.can_animate && !self.env.reduced_motion
    }

    /// Mark as connected. Targets that will never animate render their
    /// full text once here. Returns false when already connected.
    pub fn connect(&mut self) -> bool {
        if self.connected {
            return false;
        }
        self.connected = true;

        if !self.wants_signals() {
            let text = self.machine.render_full();
            self.surface.render_text(&text);
            self.surface.set_cursor(false);
        }
        true
    }

    /// Stop and detach. Returns false when already disconnected.
    pub fn disconnect(&mut self) -> bool {
        if !self.connected {
            return false;
        }
        self.machine.pause();
        self.connected = false;
        true
    }

    /// Start ticking if connected and the gate allows it
    pub fn start(&mut self, now: f64) -> HostAction {
        if !self.connected || self.printing || !self.wants_signals() || !self.gate.is_open() {
            return HostAction::Idle;
        }
        if self.machine.start(now) {
            HostAction::RequestFrame
        } else {
            HostAction::Idle
        }
    }

    pub fn pause(&mut self) -> HostAction {
        if self.machine.pause() {
            HostAction::CancelFrame
        } else {
            HostAction::Idle
        }
    }

    /// Intersection observer report
    pub fn on_viewport(&mut self, in_viewport: bool, now: f64) -> HostAction {
        let change = self.gate.set_in_viewport(in_viewport);
        if change == GateChange::Opened && !self.machine.config().resume && self.gate.reentered() {
            log::debug!("'{}' re-entered viewport, rewinding", self.key);
            self.machine.rewind();
            let text = self.machine.current_text();
            self.surface.render_text(&text);
        }
        self.apply_gate(change, now)
    }

    /// Page visibility report
    pub fn on_page_visibility(&mut self, visible: bool, now: f64) -> HostAction {
        let change = self.gate.set_page_visible(visible);
        self.apply_gate(change, now)
    }

    /// Show the whole current phrase without a cursor while printing
    pub fn before_print(&mut self) -> HostAction {
        self.printing = true;
        let action = self.pause();
        let text = self.machine.render_full();
        self.surface.render_text(&text);
        self.surface.set_cursor(false);
        action
    }

    pub fn after_print(&mut self, now: f64) -> HostAction {
        if !self.printing {
            return HostAction::Idle;
        }
        self.printing = false;
        if self.env.reduced_motion {
            return HostAction::Idle;
        }
        self.surface.set_cursor(self.machine.cursor_visible());
        self.start(now)
    }

    /// One animation frame. Returns whether another frame is wanted.
    pub fn frame(&mut self, now: f64) -> bool {
        let frame = self.machine.tick(now);
        if let Some(text) = frame.text.as_deref() {
            self.surface.render_text(text);
        }
        self.surface.set_cursor(frame.cursor_visible);
        frame.schedule_next
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let state = self.machine.state();
        EngineSnapshot {
            key: self.key.clone(),
            running: self.machine.is_running(),
            phrase_index: state.phrase_index,
            char_index: state.char_index,
            deleting: state.deleting(),
        }
    }

    fn apply_gate(&mut self, change: GateChange, now: f64) -> HostAction {
        match change {
            GateChange::Opened => self.start(now),
            GateChange::Closed => self.pause(),
            GateChange::Unchanged => HostAction::Idle,
        }
    }
}
