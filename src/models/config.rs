//! Per-target typewriter configuration
//!
//! `TargetConfig` is read once when an engine is built and never changes
//! afterwards. Values arrive as loosely-typed JSON, so every field is
//! sanitized on its own: a wrong-typed or out-of-range field falls back to
//! its default without invalidating the rest of the target.

use std::collections::BTreeMap;

use serde_json::Value;

/// Default reveal rate in characters per second
pub const DEFAULT_TYPING_SPEED: f64 = 16.0;
/// Default removal rate in characters per second
pub const DEFAULT_DELETE_SPEED: f64 = 22.0;
/// Default dwell at a fully typed phrase
pub const DEFAULT_HOLD_MS: f64 = 1100.0;
/// Default visible fraction required before animating
pub const DEFAULT_START_THRESHOLD: f64 = 0.25;

/// Wrap hint forwarded to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllowWrap {
    Soft,
    #[default]
    None,
}

impl AllowWrap {
    fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("soft") => AllowWrap::Soft,
            _ => AllowWrap::None,
        }
    }
}

/// Configuration for one animated text element
#[derive(Debug, Clone, PartialEq)]
pub struct TargetConfig {
    pub phrases: Vec<String>,
    pub typing_speed: f64,
    pub delete_speed: f64,
    pub hold_ms: f64,
    /// `loop` in JSON
    pub looping: bool,
    pub prefix: String,
    pub suffix: String,
    pub punctuation_pause: BTreeMap<char, f64>,
    pub protected_tokens: Vec<String>,
    pub allow_wrap: AllowWrap,
    pub start_threshold: f64,
    pub resume: bool,
    pub hide_cursor_while_delete: bool,
    pub width_lock: bool,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            phrases: Vec::new(),
            typing_speed: DEFAULT_TYPING_SPEED,
            delete_speed: DEFAULT_DELETE_SPEED,
            hold_ms: DEFAULT_HOLD_MS,
            looping: false,
            prefix: String::new(),
            suffix: String::new(),
            punctuation_pause: default_punctuation_pause(),
            protected_tokens: Vec::new(),
            allow_wrap: AllowWrap::None,
            start_threshold: DEFAULT_START_THRESHOLD,
            resume: true,
            hide_cursor_while_delete: false,
            width_lock: true,
        }
    }
}

/// Pauses applied after common punctuation when no map is configured
pub fn default_punctuation_pause() -> BTreeMap<char, f64> {
    [('.', 220.0), (',', 120.0), (':', 220.0), ('/', 180.0), (')', 180.0)]
        .into_iter()
        .collect()
}

impl TargetConfig {
    /// Build a config from an arbitrary JSON value, sanitizing each field
    ///
    /// Anything that is not an object yields the default config.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(obj) = value.as_object() else {
            return defaults;
        };

        let phrases = obj
            .get("phrases")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let punctuation_pause = match obj.get("punctuationPause").and_then(Value::as_object) {
            Some(map) => map
                .iter()
                .filter_map(|(key, ms)| {
                    let mut chars = key.chars();
                    let ch = chars.next()?;
                    if chars.next().is_some() {
                        return None;
                    }
                    let ms = ms.as_f64().filter(|v| v.is_finite() && *v >= 0.0)?;
                    Some((ch, ms))
                })
                .collect(),
            None => defaults.punctuation_pause,
        };

        let protected_tokens = obj
            .get("protectedTokens")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let start_threshold = obj
            .get("startThreshold")
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(defaults.start_threshold);

        Self {
            phrases,
            typing_speed: positive(obj.get("typingSpeed")).unwrap_or(defaults.typing_speed),
            delete_speed: positive(obj.get("deleteSpeed")).unwrap_or(defaults.delete_speed),
            hold_ms: obj
                .get("holdMs")
                .and_then(Value::as_f64)
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(defaults.hold_ms),
            looping: flag(obj.get("loop"), defaults.looping),
            prefix: text(obj.get("prefix")),
            suffix: text(obj.get("suffix")),
            punctuation_pause,
            protected_tokens,
            allow_wrap: AllowWrap::from_value(obj.get("allowWrap")),
            start_threshold,
            resume: flag(obj.get("resume"), defaults.resume),
            hide_cursor_while_delete: flag(
                obj.get("hideCursorWhileDelete"),
                defaults.hide_cursor_while_delete,
            ),
            width_lock: flag(obj.get("widthLock"), defaults.width_lock),
        }
    }

    /// `prefix + phrase + suffix` for every configured phrase
    pub fn rendered_phrases(&self) -> impl Iterator<Item = String> + '_ {
        self.phrases
            .iter()
            .map(move |phrase| format!("{}{}{}", self.prefix, phrase, self.suffix))
    }

    /// Extra dwell after revealing `ch`, zero when unmapped
    pub fn punctuation_pause_for(&self, ch: char) -> f64 {
        self.punctuation_pause.get(&ch).copied().unwrap_or(0.0)
    }
}

fn positive(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v > 0.0)
}

fn flag(value: Option<&Value>, default: bool) -> bool {
    value.and_then(Value::as_bool).unwrap_or(default)
}

fn text(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}
