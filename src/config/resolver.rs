//! Configuration resolver
//!
//! Priority: in-memory override (if it has a `targets` mapping), then the
//! fetched document, then nothing. Failures at any step fall through to the
//! next one and end in an empty document; they are logged, never returned.

use std::collections::BTreeMap;
use std::future::Future;

use serde_json::Value;

use crate::config::errors::ConfigError;
use crate::models::TargetConfig;

/// Location of the external configuration document
pub const CONFIG_URL: &str = "/assets/json/wtl.json";

/// Name of the host-settable global override
pub const OVERRIDE_GLOBAL: &str = "WTL_CONFIG";

/// Target key → configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    targets: BTreeMap<String, TargetConfig>,
}

impl ConfigDocument {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read a `{ "targets": { ... } }` document
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let obj = value.as_object().ok_or(ConfigError::NotAnObject)?;
        let targets = obj
            .get("targets")
            .and_then(Value::as_object)
            .ok_or(ConfigError::MissingTargets)?;

        Ok(Self {
            targets: targets
                .iter()
                .map(|(key, raw)| (key.clone(), TargetConfig::from_value(raw)))
                .collect(),
        })
    }

    pub fn from_json_str(body: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(&value)
    }

    /// Config for `key`, or the default config when the key is unknown
    pub fn target(&self, key: &str) -> TargetConfig {
        self.targets.get(key).cloned().unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.targets.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Where a resolved configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Override,
    Fetched,
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub source: ConfigSource,
    pub document: ConfigDocument,
}

impl ResolvedConfig {
    pub fn empty() -> Self {
        Self {
            source: ConfigSource::Empty,
            document: ConfigDocument::empty(),
        }
    }
}

/// A well-formed override document, if one was supplied
pub fn from_override(value: Option<&Value>) -> Option<ConfigDocument> {
    let value = value?;
    match ConfigDocument::from_value(value) {
        Ok(document) => Some(document),
        Err(err) => {
            log::warn!("ignoring config override: {}", err);
            None
        }
    }
}

/// Turn the outcome of fetching the document body into a configuration
pub fn from_fetch(body: Result<String, ConfigError>) -> ResolvedConfig {
    match body.and_then(|text| ConfigDocument::from_json_str(&text)) {
        Ok(document) => {
            log::info!("loaded {} target config(s) from {}", document.len(), CONFIG_URL);
            ResolvedConfig {
                source: ConfigSource::Fetched,
                document,
            }
        }
        Err(err) => {
            log::info!("no external typewriter config: {}", err);
            ResolvedConfig::empty()
        }
    }
}

/// Resolve the configuration, awaiting the fetch only when no override
/// applies. The returned future completes on every path.
pub async fn resolve<F, Fut>(override_doc: Option<Value>, fetch: F) -> ResolvedConfig
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, ConfigError>>,
{
    if let Some(document) = from_override(override_doc.as_ref()) {
        log::info!("using config override with {} target(s)", document.len());
        return ResolvedConfig {
            source: ConfigSource::Override,
            document,
        };
    }
    from_fetch(fetch().await)
}

/// Let a document installed while resolution was in flight win over the
/// resolved one
pub fn prefer_installed(installed: Option<ConfigDocument>, resolved: ResolvedConfig) -> ResolvedConfig {
    match installed {
        Some(document) => ResolvedConfig {
            source: ConfigSource::Override,
            document,
        },
        None => resolved,
    }
}
