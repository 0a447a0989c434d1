//! Browser environment probing

use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::dom::errors::HostError;
use crate::engine::Environment;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub fn window() -> Result<Window, HostError> {
    web_sys::window().ok_or(HostError::NoWindow)
}

pub fn document() -> Result<Document, HostError> {
    window()?.document().ok_or(HostError::NoDocument)
}

/// High-resolution timestamp in milliseconds, same base as frame callbacks
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn prefers_reduced_motion(window: &Window) -> bool {
    matches!(
        window.match_media(REDUCED_MOTION_QUERY),
        Ok(Some(query)) if query.matches()
    )
}

pub fn page_hidden(document: &Document) -> bool {
    document.hidden()
}

fn has_global(window: &Window, name: &str) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str(name)).unwrap_or(false)
}

/// `document.readyState == "loading"`
pub fn still_loading(document: &Document) -> bool {
    js_sys::Reflect::get(document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|state| state.as_string())
        .map_or(false, |state| state == "loading")
}

/// Capture everything a target needs to know about the host
pub fn probe(window: &Window, document: &Document) -> Environment {
    let can_animate =
        has_global(window, "requestAnimationFrame") && has_global(window, "IntersectionObserver");
    if !can_animate {
        log::warn!("animation APIs unavailable, rendering typewriter targets statically");
    }
    Environment {
        reduced_motion: prefers_reduced_motion(window),
        page_visible: !page_hidden(document),
        can_animate,
    }
}
