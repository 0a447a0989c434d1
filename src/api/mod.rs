//! Typewriter runtime WASM API
//!
//! # Module Structure
//!
//! - `helpers`: serde conversions between Rust and JavaScript values
//! - `core`: the process-wide runtime and the exported control surface
//!   (`setConfig`, `startAll`, `pauseAll`, `getState`, `disconnectAll`)

pub mod core;
pub mod helpers;

pub use core::{disconnect_all, get_state, pause_all, schedule_boot, set_config, start_all};
