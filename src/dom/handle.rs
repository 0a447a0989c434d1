//! Browser binding for one target
//!
//! `TargetHandle` owns the animation-frame loop and the listeners that feed
//! the target's visibility gate. Each handle schedules its own frames; no
//! two frames for the same handle are ever pending at once.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::dom::env::{now, page_hidden};
use crate::dom::errors::HostError;
use crate::dom::surface::DomSurface;
use crate::engine::{Environment, HostAction, Target};
use crate::models::{EngineSnapshot, TargetConfig};
use crate::orchestrator::EngineHandle;

type FrameCallback = Closure<dyn FnMut(f64)>;
type EventCallback = Closure<dyn FnMut(Event)>;
type IntersectCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct Binding {
    target: Target<DomSurface>,
    raf_id: Option<i32>,
    frame_cb: Option<FrameCallback>,
}

type Shared = Rc<RefCell<Binding>>;

fn perform(window: &Window, shared: &Shared, action: HostAction) {
    match action {
        HostAction::RequestFrame => request_frame(window, shared),
        HostAction::CancelFrame => cancel_frame(window, shared),
        HostAction::Idle => {}
    }
}

fn request_frame(window: &Window, shared: &Shared) {
    let mut guard = shared.borrow_mut();
    let binding = &mut *guard;
    if binding.raf_id.is_some() {
        return;
    }
    let requested = match binding.frame_cb.as_ref() {
        Some(cb) => window.request_animation_frame(cb.as_ref().unchecked_ref()),
        None => return,
    };
    match requested {
        Ok(id) => binding.raf_id = Some(id),
        Err(err) => {
            log::warn!("requestAnimationFrame failed for '{}': {:?}", binding.target.key(), err);
            binding.target.pause();
        }
    }
}

fn cancel_frame(window: &Window, shared: &Shared) {
    let pending = shared.borrow_mut().raf_id.take();
    if let Some(id) = pending {
        if let Err(err) = window.cancel_animation_frame(id) {
            log::debug!("cancelAnimationFrame failed: {:?}", err);
        }
    }
}

/// Listeners feeding viewport, page visibility and print events
struct Listeners {
    observer: IntersectionObserver,
    _on_intersect: IntersectCallback,
    on_visibility: EventCallback,
    on_before_print: EventCallback,
    on_after_print: EventCallback,
}

impl Listeners {
    fn attach(
        element: &HtmlElement,
        window: &Window,
        document: &Document,
        shared: &Shared,
        threshold: f64,
    ) -> Result<Self, HostError> {
        let on_intersect = {
            let weak = Rc::downgrade(shared);
            let window = window.clone();
            IntersectCallback::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let in_view = entry.is_intersecting() && entry.intersection_ratio() >= threshold;
                    let action = shared.borrow_mut().target.on_viewport(in_view, now());
                    perform(&window, &shared, action);
                }
            })
        };

        let on_visibility = {
            let weak = Rc::downgrade(shared);
            let window = window.clone();
            let document = document.clone();
            EventCallback::new(move |_event: Event| {
                with_shared(&weak, |shared| {
                    let visible = !page_hidden(&document);
                    let action = shared.borrow_mut().target.on_page_visibility(visible, now());
                    perform(&window, shared, action);
                });
            })
        };

        let on_before_print = {
            let weak = Rc::downgrade(shared);
            let window = window.clone();
            EventCallback::new(move |_event: Event| {
                with_shared(&weak, |shared| {
                    let action = shared.borrow_mut().target.before_print();
                    perform(&window, shared, action);
                });
            })
        };

        let on_after_print = {
            let weak = Rc::downgrade(shared);
            let window = window.clone();
            EventCallback::new(move |_event: Event| {
                with_shared(&weak, |shared| {
                    let action = shared.borrow_mut().target.after_print(now());
                    perform(&window, shared, action);
                });
            })
        };

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)?;

        let listeners = Self {
            observer,
            _on_intersect: on_intersect,
            on_visibility,
            on_before_print,
            on_after_print,
        };
        if let Err(err) = listeners.register(element, window, document) {
            listeners.detach(window, document);
            return Err(err);
        }
        Ok(listeners)
    }

    fn register(&self, element: &HtmlElement, window: &Window, document: &Document) -> Result<(), HostError> {
        document.add_event_listener_with_callback(
            "visibilitychange",
            self.on_visibility.as_ref().unchecked_ref(),
        )?;
        window.add_event_listener_with_callback(
            "beforeprint",
            self.on_before_print.as_ref().unchecked_ref(),
        )?;
        window.add_event_listener_with_callback(
            "afterprint",
            self.on_after_print.as_ref().unchecked_ref(),
        )?;
        self.observer.observe(element);
        Ok(())
    }

    fn detach(&self, window: &Window, document: &Document) {
        self.observer.disconnect();
        let removed = document
            .remove_event_listener_with_callback(
                "visibilitychange",
                self.on_visibility.as_ref().unchecked_ref(),
            )
            .and_then(|_| {
                window.remove_event_listener_with_callback(
                    "beforeprint",
                    self.on_before_print.as_ref().unchecked_ref(),
                )
            })
            .and_then(|_| {
                window.remove_event_listener_with_callback(
                    "afterprint",
                    self.on_after_print.as_ref().unchecked_ref(),
                )
            });
        if let Err(err) = removed {
            log::debug!("listener removal failed: {:?}", err);
        }
    }
}

fn with_shared(weak: &Weak<RefCell<Binding>>, f: impl FnOnce(&Shared)) {
    if let Some(shared) = weak.upgrade() {
        f(&shared);
    }
}

/// One DOM element driven by one typewriter engine
pub struct TargetHandle {
    shared: Shared,
    window: Window,
    document: Document,
    listeners: Option<Listeners>,
}

impl TargetHandle {
    /// Build the engine for `element` and connect it right away
    pub fn bind(
        key: &str,
        config: TargetConfig,
        element: HtmlElement,
        env: Environment,
        window: &Window,
        document: &Document,
    ) -> Result<Self, HostError> {
        let threshold = config.start_threshold;
        let surface = DomSurface::new(element.clone(), window.clone(), document.clone());
        let shared: Shared = Rc::new(RefCell::new(Binding {
            target: Target::new(key, config, surface, env),
            raf_id: None,
            frame_cb: None,
        }));

        let frame_cb = {
            let weak = Rc::downgrade(&shared);
            let window = window.clone();
            FrameCallback::new(move |timestamp: f64| {
                with_shared(&weak, |shared| {
                    let again = {
                        let mut binding = shared.borrow_mut();
                        binding.raf_id = None;
                        binding.target.frame(timestamp)
                    };
                    if again {
                        request_frame(&window, shared);
                    }
                });
            })
        };
        shared.borrow_mut().frame_cb = Some(frame_cb);

        let wants_signals = {
            let mut binding = shared.borrow_mut();
            binding.target.connect();
            binding.target.wants_signals()
        };

        let listeners = if wants_signals {
            Some(Listeners::attach(&element, window, document, &shared, threshold)?)
        } else {
            None
        };

        log::debug!("bound typewriter target '{}'", key);
        Ok(Self {
            shared,
            window: window.clone(),
            document: document.clone(),
            listeners,
        })
    }
}

impl EngineHandle for TargetHandle {
    fn start(&mut self) {
        let action = self.shared.borrow_mut().target.start(now());
        perform(&self.window, &self.shared, action);
    }

    fn pause(&mut self) {
        let action = self.shared.borrow_mut().target.pause();
        perform(&self.window, &self.shared, action);
        // A frame may be pending even if the engine already stopped itself
        cancel_frame(&self.window, &self.shared);
    }

    fn disconnect(&mut self) {
        self.shared.borrow_mut().target.disconnect();
        cancel_frame(&self.window, &self.shared);
        if let Some(listeners) = self.listeners.take() {
            listeners.detach(&self.window, &self.document);
        }
    }

    fn snapshot(&self) -> EngineSnapshot {
        self.shared.borrow().target.snapshot()
    }
}

impl Drop for TargetHandle {
    fn drop(&mut self) {
        self.disconnect();
    }
}
