//! Data models for the typewriter runtime
//!
//! - `config`: per-target configuration and its sanitizing reader
//! - `engine_state`: mutable engine progress and the read-only snapshot

pub mod config;
pub mod engine_state;

pub use config::{AllowWrap, TargetConfig};
pub use engine_state::{EngineSnapshot, EngineState, Phase};
