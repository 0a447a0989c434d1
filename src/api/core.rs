//! Process-wide typewriter runtime and its JavaScript exports
//!
//! Boot order: resolve configuration completely, then discover targets and
//! build one engine per target, then start them all. Engines connect to
//! their visibility signals as soon as they are built.

use std::cell::RefCell;
use std::sync::Mutex;

use lazy_static::lazy_static;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

use crate::api::helpers;
use crate::config::{from_override, prefer_installed, ConfigDocument, ConfigSource, ResolvedConfig};
use crate::dom::fetch::{load_config, read_override};
use crate::dom::{discover, env, HostError, TargetHandle};
use crate::orchestrator::Orchestrator;

// Override installed through `setConfig`; wins over `window.WTL_CONFIG`
lazy_static! {
    static ref CONFIG_OVERRIDE: Mutex<Option<ConfigDocument>> = Mutex::new(None);
}

// Handles own JS closures and are not `Send`, so the runtime lives in a
// thread local rather than behind the mutex
thread_local! {
    static RUNTIME: RefCell<Option<Orchestrator<TargetHandle>>> = RefCell::new(None);
}

fn stored_override() -> Option<ConfigDocument> {
    match CONFIG_OVERRIDE.lock() {
        Ok(guard) => guard.clone(),
        Err(e) => {
            log::warn!("config override lock poisoned: {}", e);
            None
        }
    }
}

fn with_runtime<R>(f: impl FnOnce(&mut Orchestrator<TargetHandle>) -> R) -> Option<R> {
    RUNTIME.with(|runtime| runtime.borrow_mut().as_mut().map(f))
}

/// Discover targets and build their engines from `config`
fn build_runtime(
    window: &Window,
    document: &Document,
    config: &ConfigDocument,
) -> Result<Orchestrator<TargetHandle>, HostError> {
    let host = env::probe(window, document);
    let mut orchestrator = Orchestrator::new(host.reduced_motion);
    orchestrator.setup(config, discover(document)?, |key, target_config, element| {
        TargetHandle::bind(key, target_config, element, host, window, document)
    });
    Ok(orchestrator)
}

/// Replace the running engines with fresh ones built from `config`
fn install(config: &ConfigDocument) -> Result<(), HostError> {
    let window = env::window()?;
    let document = window.document().ok_or(HostError::NoDocument)?;

    RUNTIME.with(|runtime| {
        if let Some(mut previous) = runtime.borrow_mut().take() {
            previous.disconnect_all();
        }
    });

    let mut orchestrator = build_runtime(&window, &document, config)?;
    orchestrator.start_all();
    RUNTIME.with(|runtime| *runtime.borrow_mut() = Some(orchestrator));
    Ok(())
}

async fn boot() {
    let window = match env::window() {
        Ok(window) => window,
        Err(e) => {
            log::warn!("typewriter boot skipped: {}", e);
            return;
        }
    };

    let resolved = match stored_override() {
        Some(document) => ResolvedConfig {
            source: ConfigSource::Override,
            document,
        },
        None => {
            let loaded = load_config(&window, read_override(&window)).await;
            // setConfig may have run while the fetch was pending
            prefer_installed(stored_override(), loaded)
        }
    };
    log::debug!("typewriter config source: {:?}", resolved.source);

    if let Err(e) = install(&resolved.document) {
        log::warn!("typewriter setup failed: {}", e);
    }
}

/// Run `boot` now, or once the DOM has finished loading
pub fn schedule_boot() {
    let document = match env::document() {
        Ok(document) => document,
        Err(e) => {
            log::warn!("typewriter boot skipped: {}", e);
            return;
        }
    };

    if !env::still_loading(&document) {
        wasm_bindgen_futures::spawn_local(boot());
        return;
    }

    let on_ready = Closure::once_into_js(|| wasm_bindgen_futures::spawn_local(boot()));
    if let Err(e) =
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
    {
        log::warn!("could not wait for DOMContentLoaded: {:?}", e);
    }
}

/// Install a configuration document (`{ targets: { ... } }`)
///
/// Malformed documents are ignored. If engines are already running they
/// are rebuilt, since a target's configuration is fixed once built.
#[wasm_bindgen(js_name = setConfig)]
pub fn set_config(doc: JsValue) {
    let Ok(value) = helpers::deserialize::<serde_json::Value>(doc, "setConfig") else {
        return;
    };
    let Some(document) = from_override(Some(&value)) else {
        return;
    };

    match CONFIG_OVERRIDE.lock() {
        Ok(mut guard) => *guard = Some(document.clone()),
        Err(e) => log::warn!("config override lock poisoned: {}", e),
    }

    let booted = RUNTIME.with(|runtime| runtime.borrow().is_some());
    if booted {
        log::info!("setConfig: rebuilding typewriter targets");
        if let Err(e) = install(&document) {
            log::warn!("typewriter rebuild failed: {}", e);
        }
    }
}

/// Start every engine whose target is currently visible
#[wasm_bindgen(js_name = startAll)]
pub fn start_all() {
    with_runtime(|orchestrator| orchestrator.start_all());
}

/// Pause every engine, keeping its progress
#[wasm_bindgen(js_name = pauseAll)]
pub fn pause_all() {
    with_runtime(|orchestrator| orchestrator.pause_all());
}

/// Detach every engine from its element and signals
#[wasm_bindgen(js_name = disconnectAll)]
pub fn disconnect_all() {
    with_runtime(|orchestrator| orchestrator.disconnect_all());
}

/// Snapshot of `{ key, running, phraseIndex, charIndex, deleting }` per engine
#[wasm_bindgen(js_name = getState)]
pub fn get_state() -> Result<JsValue, JsValue> {
    let snapshots = with_runtime(|orchestrator| orchestrator.state()).unwrap_or_default();
    helpers::serialize(&snapshots, "getState")
}
