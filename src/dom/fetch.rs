//! Browser side of configuration loading: the global override and the
//! network fetch. Both map every failure into `ConfigError` for the
//! resolver to swallow.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestCredentials, RequestInit, Response, Window};

use crate::config::{resolve, ConfigError, ResolvedConfig, CONFIG_URL, OVERRIDE_GLOBAL};

fn fetch_error(err: JsValue) -> ConfigError {
    ConfigError::Fetch(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// `window.WTL_CONFIG` converted to JSON, when it is an object
pub fn read_override(window: &Window) -> Option<serde_json::Value> {
    let raw = js_sys::Reflect::get(window, &JsValue::from_str(OVERRIDE_GLOBAL)).ok()?;
    if !raw.is_object() {
        return None;
    }
    match serde_wasm_bindgen::from_value(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{} could not be read: {}", OVERRIDE_GLOBAL, err);
            None
        }
    }
}

/// GET the config document body, uncached, with same-origin credentials
pub async fn fetch_config_body(window: Window) -> Result<String, ConfigError> {
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_cache(RequestCache::NoStore);
    init.set_credentials(RequestCredentials::SameOrigin);

    let request = Request::new_with_str_and_init(CONFIG_URL, &init).map_err(fetch_error)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(fetch_error)?
        .dyn_into()
        .map_err(fetch_error)?;

    if !response.ok() {
        return Err(ConfigError::Status(response.status()));
    }

    let body = JsFuture::from(response.text().map_err(fetch_error)?)
        .await
        .map_err(fetch_error)?;
    body.as_string()
        .ok_or_else(|| ConfigError::Parse("response body is not text".into()))
}

/// Resolve configuration from `override_doc`, else from the network
pub async fn load_config(window: &Window, override_doc: Option<serde_json::Value>) -> ResolvedConfig {
    let window = window.clone();
    resolve(override_doc, move || fetch_config_body(window)).await
}
