//! Browser tests for the DOM surface and target binding
#![cfg(target_arch = "wasm32")]

use typeloop_wasm::dom::surface::{CURSOR_OFF_CLASS, CURSOR_ON_CLASS, LOCKED_CLASS, WRAP_ATTR};
use typeloop_wasm::dom::{discover, env, DomSurface, TargetHandle};
use typeloop_wasm::{AllowWrap, EngineHandle, Environment, Surface, TargetConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn make_target(key: &str) -> HtmlElement {
    let document = env::document().unwrap();
    let element: HtmlElement = document.create_element("span").unwrap().dyn_into().unwrap();
    element.set_class_name("wtl");
    element.set_attribute("data-wtl-key", key).unwrap();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

fn surface_for(element: &HtmlElement) -> DomSurface {
    let window = env::window().unwrap();
    let document = env::document().unwrap();
    DomSurface::new(element.clone(), window, document)
}

#[wasm_bindgen_test]
fn test_surface_updates_text_and_classes() {
    let element = make_target("surface");
    let mut surface = surface_for(&element);

    surface.render_text("hello");
    assert_eq!(element.text_content().as_deref(), Some("hello"));

    surface.set_cursor(false);
    assert!(element.class_list().contains(CURSOR_OFF_CLASS));
    assert!(!element.class_list().contains(CURSOR_ON_CLASS));
    surface.set_cursor(true);
    assert!(element.class_list().contains(CURSOR_ON_CLASS));

    surface.set_wrap(AllowWrap::Soft);
    assert_eq!(element.get_attribute(WRAP_ATTR).as_deref(), Some("soft"));
    surface.set_wrap(AllowWrap::None);
    assert_eq!(element.get_attribute(WRAP_ATTR), None);

    surface.lock_width(52.0);
    assert!(element.class_list().contains(LOCKED_CLASS));
    assert_eq!(element.style().get_property_value("min-width").unwrap(), "52px");
}

#[wasm_bindgen_test]
fn test_measure_text_grows_with_length() {
    let element = make_target("measure");
    let surface = surface_for(&element);

    let short = surface.measure_text("ab");
    let long = surface.measure_text("abcdefgh");
    assert!(short > 0.0);
    assert!(long > short);
}

#[wasm_bindgen_test]
fn test_discover_finds_flagged_targets() {
    make_target("discover-me");
    let document = env::document().unwrap();
    let found = discover(&document).unwrap();
    assert!(found.iter().any(|(key, _)| key == "discover-me"));
}

#[wasm_bindgen_test]
fn test_static_binding_renders_first_phrase() {
    let element = make_target("static");
    let window = env::window().unwrap();
    let document = env::document().unwrap();
    let config = TargetConfig {
        phrases: vec!["first".into(), "second".into()],
        prefix: "> ".into(),
        ..TargetConfig::default()
    };
    let env = Environment {
        can_animate: false,
        ..Environment::default()
    };

    let mut handle = TargetHandle::bind("static", config, element.clone(), env, &window, &document).unwrap();
    assert_eq!(element.text_content().as_deref(), Some("> first"));
    assert!(element.class_list().contains(CURSOR_OFF_CLASS));

    handle.start();
    assert!(!handle.snapshot().running);
    handle.disconnect();
    handle.disconnect();
}

#[wasm_bindgen_test]
fn test_animated_binding_connects_and_pauses() {
    let element = make_target("animated");
    let window = env::window().unwrap();
    let document = env::document().unwrap();
    let config = TargetConfig {
        phrases: vec!["animated".into()],
        ..TargetConfig::default()
    };

    let mut handle =
        TargetHandle::bind("animated", config, element, Environment::default(), &window, &document).unwrap();
    handle.pause();
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.key, "animated");
    assert!(!snapshot.running);
    handle.disconnect();
}
