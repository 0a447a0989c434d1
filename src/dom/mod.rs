//! Browser bindings (web-sys)
//!
//! - `env`: window/document access and capability probing
//! - `surface`: the DOM `Surface` and target discovery
//! - `handle`: per-target frame loop and signal listeners
//! - `fetch`: global override and network config loading
//! - `errors`: `HostError`

pub mod env;
pub mod errors;
pub mod fetch;
pub mod handle;
pub mod surface;

pub use errors::HostError;
pub use handle::TargetHandle;
pub use surface::{discover, DomSurface};
