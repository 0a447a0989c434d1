//! DOM-backed `Surface`
//!
//! Presentation contract with the page:
//! - targets are elements matching `.wtl[data-wtl-key]`
//! - cursor state is exposed as `wtl--cursor-on` / `wtl--cursor-off`
//! - a width-locked element gets an inline `min-width` and `wtl--locked`
//! - soft wrapping is signalled with `data-wtl-wrap="soft"`

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::dom::errors::HostError;
use crate::engine::Surface;
use crate::models::AllowWrap;

pub const TARGET_SELECTOR: &str = ".wtl[data-wtl-key]";
pub const KEY_ATTR: &str = "data-wtl-key";
pub const WRAP_ATTR: &str = "data-wtl-wrap";
pub const CURSOR_ON_CLASS: &str = "wtl--cursor-on";
pub const CURSOR_OFF_CLASS: &str = "wtl--cursor-off";
pub const LOCKED_CLASS: &str = "wtl--locked";

/// Text styles copied onto the measuring probe
const MEASURED_PROPERTIES: [&str; 5] = [
    "font-family",
    "font-size",
    "font-weight",
    "letter-spacing",
    "word-spacing",
];

/// All flagged targets in document order, paired with their key
pub fn discover(document: &Document) -> Result<Vec<(String, HtmlElement)>, HostError> {
    let nodes = document.query_selector_all(TARGET_SELECTOR)?;
    let targets = (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .filter_map(|element| element.get_attribute(KEY_ATTR).map(|key| (key, element)))
        .collect();
    Ok(targets)
}

pub struct DomSurface {
    element: HtmlElement,
    window: Window,
    document: Document,
}

impl DomSurface {
    pub fn new(element: HtmlElement, window: Window, document: Document) -> Self {
        Self {
            element,
            window,
            document,
        }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// Width of `text` rendered in an off-screen span styled like the target
    fn probe_width(&self, text: &str) -> Result<f64, HostError> {
        let computed = self
            .window
            .get_computed_style(&self.element)?
            .ok_or_else(|| HostError::Js("no computed style for target".into()))?;
        let body = self.document.body().ok_or(HostError::NoDocument)?;

        let probe: HtmlElement = self
            .document
            .create_element("span")?
            .dyn_into()
            .map_err(|_| HostError::Js("probe is not an HTML element".into()))?;

        let style = probe.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", "-99999px")?;
        style.set_property("top", "0")?;
        style.set_property("white-space", "pre")?;
        style.set_property("visibility", "hidden")?;
        for property in MEASURED_PROPERTIES {
            style.set_property(property, &computed.get_property_value(property)?)?;
        }
        probe.set_text_content(Some(text));

        body.append_child(&probe)?;
        let width = probe.get_bounding_client_rect().width();
        body.remove_child(&probe)?;
        Ok(width)
    }
}

impl Surface for DomSurface {
    fn render_text(&mut self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn set_cursor(&mut self, visible: bool) {
        let classes = self.element.class_list();
        let toggled = classes
            .toggle_with_force(CURSOR_ON_CLASS, visible)
            .and_then(|_| classes.toggle_with_force(CURSOR_OFF_CLASS, !visible));
        if let Err(err) = toggled {
            log::debug!("cursor class toggle failed: {:?}", err);
        }
    }

    fn lock_width(&mut self, min_width_px: f64) {
        let locked = self
            .element
            .style()
            .set_property("min-width", &format!("{}px", min_width_px))
            .and_then(|_| self.element.class_list().add_1(LOCKED_CLASS));
        if let Err(err) = locked {
            log::warn!("width lock failed: {:?}", err);
        }
    }

    fn set_wrap(&mut self, wrap: AllowWrap) {
        let result = match wrap {
            AllowWrap::Soft => self.element.set_attribute(WRAP_ATTR, "soft"),
            AllowWrap::None => self.element.remove_attribute(WRAP_ATTR),
        };
        if let Err(err) = result {
            log::debug!("wrap attribute update failed: {:?}", err);
        }
    }

    fn measure_text(&self, text: &str) -> f64 {
        match self.probe_width(text) {
            Ok(width) => width,
            Err(err) => {
                log::debug!("text measurement failed: {}", err);
                0.0
            }
        }
    }
}
