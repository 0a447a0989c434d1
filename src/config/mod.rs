//! Configuration loading
//!
//! `resolver` holds the override → fetch → empty chain over plain JSON
//! values; the browser side of fetching lives in `dom::fetch`.

pub mod errors;
pub mod resolver;

pub use errors::ConfigError;
pub use resolver::{
    from_fetch, from_override, prefer_installed, resolve, ConfigDocument, ConfigSource, ResolvedConfig, CONFIG_URL,
    OVERRIDE_GLOBAL,
};
