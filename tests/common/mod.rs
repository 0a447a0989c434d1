// Shared fixtures for the native integration tests
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use typeloop_wasm::{AllowWrap, EngineHandle, EngineSnapshot, Environment, Surface, Target, TargetConfig};

/// Surface that records what the engine asked it to show
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub texts: Vec<String>,
    pub cursor: Option<bool>,
    pub min_width: Option<f64>,
    pub wrap: Option<AllowWrap>,
    /// Pixels per character returned by `measure_text`
    pub char_width: f64,
}

impl RecordingSurface {
    pub fn with_char_width(char_width: f64) -> Self {
        Self {
            char_width,
            ..Self::default()
        }
    }

    pub fn last_text(&self) -> Option<&str> {
        self.texts.last().map(String::as_str)
    }
}

impl Surface for RecordingSurface {
    fn render_text(&mut self, text: &str) {
        self.texts.push(text.to_string());
    }

    fn set_cursor(&mut self, visible: bool) {
        self.cursor = Some(visible);
    }

    fn lock_width(&mut self, min_width_px: f64) {
        self.min_width = Some(min_width_px);
    }

    fn set_wrap(&mut self, wrap: AllowWrap) {
        self.wrap = Some(wrap);
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }
}

pub fn phrases_config(phrases: &[&str]) -> TargetConfig {
    TargetConfig {
        phrases: phrases.iter().map(|p| p.to_string()).collect(),
        punctuation_pause: Default::default(),
        ..TargetConfig::default()
    }
}

pub fn target(config: TargetConfig) -> Target<RecordingSurface> {
    Target::new("hero", config, RecordingSurface::with_char_width(8.0), Environment::default())
}

/// Engine handle driven by a manual clock instead of animation frames
pub struct SimHandle {
    pub target: Target<RecordingSurface>,
    pub clock: Rc<Cell<f64>>,
}

impl SimHandle {
    pub fn new(key: &str, config: TargetConfig, env: Environment, clock: Rc<Cell<f64>>) -> Self {
        let mut target = Target::new(key, config, RecordingSurface::default(), env);
        target.connect();
        Self { target, clock }
    }
}

impl EngineHandle for SimHandle {
    fn start(&mut self) {
        self.target.start(self.clock.get());
    }

    fn pause(&mut self) {
        self.target.pause();
    }

    fn disconnect(&mut self) {
        self.target.disconnect();
    }

    fn snapshot(&self) -> EngineSnapshot {
        self.target.snapshot()
    }
}
