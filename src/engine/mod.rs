//! Typewriter engine
//!
//! Everything here is host-independent and runs natively:
//!
//! - `tokens`: rendered phrase text and protected-token snapping
//! - `typewriter`: the typing / holding / deleting state machine
//! - `gate`: viewport + page visibility gate
//! - `width`: width-lock calculation
//! - `target`: machine, gate and a `Surface` wired together per element

pub mod gate;
pub mod target;
pub mod tokens;
pub mod typewriter;
pub mod width;

pub use gate::{GateChange, VisibilityGate};
pub use target::{Environment, HostAction, Surface, Target};
pub use tokens::FullText;
pub use typewriter::{chars_for, Frame, Typewriter};
pub use width::locked_min_width;
