//! Typewriter Loop WASM Module
//!
//! Resumable multi-target typewriter for web pages. Every element marked
//! `.wtl[data-wtl-key]` gets its own engine that types, holds and deletes
//! configured phrases while it is visible.

pub mod api;
pub mod config;
pub mod dom;
pub mod engine;
pub mod models;
pub mod orchestrator;

// Re-export commonly used types
pub use config::{ConfigDocument, ConfigError};
pub use engine::{Environment, HostAction, Surface, Target, Typewriter};
pub use models::{AllowWrap, EngineSnapshot, EngineState, Phase, TargetConfig};
pub use orchestrator::{EngineHandle, Orchestrator};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Typewriter loop WASM module initialized");
    api::schedule_boot();
}
