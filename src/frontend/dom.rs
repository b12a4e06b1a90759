//! Browser resources tied to Rust lifetimes: subscribe on construction, release on drop.
//!
//! Every lookup here is best-effort. A missing window, element or API yields
//! `None` and the caller skips the effect.

use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, AddEventListenerOptions, CssStyleDeclaration, Document, Element, Event, EventTarget,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MediaQueryList,
    ScrollBehavior, ScrollToOptions, Storage,
};

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

pub fn media_query(query: &str) -> Option<MediaQueryList> {
    window()?.match_media(query).ok().flatten()
}

pub fn media_matches(query: &str) -> bool {
    media_query(query).map(|list| list.matches()).unwrap_or(false)
}

pub fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub fn scroll_y() -> f64 {
    window().and_then(|win| win.scroll_y().ok()).unwrap_or(0.0)
}

/// Scrolls so the element's top lands `offset` px below the viewport top.
pub fn scroll_to_element(id: &str, offset: f64, smooth: bool) {
    let (Some(win), Some(element)) = (window(), element_by_id(id)) else {
        return;
    };

    let top = element.get_bounding_client_rect().top() + scroll_y() - offset;
    let options = ScrollToOptions::new();
    options.set_top(top.max(0.0));
    options.set_behavior(if smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Instant
    });
    win.scroll_to_with_scroll_to_options(&options);
}

/// Value of a custom property on `<html>`, e.g. `--primary`.
pub fn root_css_variable(name: &str) -> Option<String> {
    let win = window()?;
    let root = win.document()?.document_element()?;
    let style: CssStyleDeclaration = win.get_computed_style(&root).ok().flatten()?;
    let value = style.get_property_value(name).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn random() -> f64 {
    js_sys::Math::random()
}

/// A DOM event subscription, removed on drop.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok()?;

        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Same as [`EventListener::new`] with `{ passive: true }`; for scroll and touch streams.
    pub fn passive(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .ok()?;

        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    pub fn on_window(event: &'static str, handler: impl FnMut(Event) + 'static) -> Option<Self> {
        Self::passive(&window()?, event, handler)
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// One pending `requestAnimationFrame` callback, cancelled on drop.
pub struct AnimationFrame {
    id: i32,
}

impl AnimationFrame {
    pub fn request(callback: impl FnOnce(f64) + 'static) -> Option<Self> {
        let callback = Closure::once_into_js(callback);
        let id = window()?
            .request_animation_frame(callback.unchecked_ref())
            .ok()?;
        Some(Self { id })
    }
}

impl Drop for AnimationFrame {
    fn drop(&mut self) {
        if let Some(win) = window() {
            let _ = win.cancel_animation_frame(self.id);
        }
    }
}

/// One pending `setTimeout` callback, cleared on drop.
pub struct Timeout {
    id: i32,
}

impl Timeout {
    pub fn new(millis: i32, callback: impl FnOnce() + 'static) -> Option<Self> {
        let callback = Closure::once_into_js(callback);
        let id = window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
            .ok()?;
        Some(Self { id })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(win) = window() {
            win.clear_timeout_with_handle(self.id);
        }
    }
}

/// A repeating `setInterval` callback, cleared on drop.
pub struct Interval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(millis: i32, callback: impl FnMut() + 'static) -> Option<Self> {
        let callback = Closure::<dyn FnMut()>::new(callback);
        let id = window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), millis)
            .ok()?;
        Some(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(win) = window() {
            win.clear_interval_with_handle(self.id);
        }
    }
}

struct FrameLoopState {
    handle: Option<i32>,
    callback: Option<Closure<dyn FnMut(f64)>>,
}

/// A self-rescheduling `requestAnimationFrame` loop. `tick` receives the frame
/// timestamp in milliseconds and must not drop the loop that drives it.
pub struct FrameLoop {
    state: Rc<RefCell<FrameLoopState>>,
}

impl FrameLoop {
    pub fn start(mut tick: impl FnMut(f64) + 'static) -> Option<Self> {
        let state = Rc::new(RefCell::new(FrameLoopState {
            handle: None,
            callback: None,
        }));

        let weak = Rc::downgrade(&state);
        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            tick(timestamp);
            if let Some(state) = weak.upgrade() {
                schedule_frame(&state);
            }
        });
        state.borrow_mut().callback = Some(callback);

        schedule_frame(&state)?;
        Some(Self { state })
    }
}

fn schedule_frame(state: &Rc<RefCell<FrameLoopState>>) -> Option<()> {
    let mut inner = state.borrow_mut();
    let callback = inner.callback.as_ref()?;
    let id = window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()?;
    inner.handle = Some(id);
    Some(())
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        let mut inner = self.state.borrow_mut();
        if let (Some(id), Some(win)) = (inner.handle.take(), window()) {
            let _ = win.cancel_animation_frame(id);
        }
        inner.callback = None;
    }
}

/// Fires `on_visible` once, the first time `target` intersects the viewport.
pub struct ViewObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl ViewObserver {
    pub fn once(target: &Element, root_margin: &str, on_visible: impl FnOnce() + 'static) -> Option<Self> {
        let mut on_visible = Some(on_visible);
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let visible = entries.iter().any(|entry: JsValue| {
                    entry
                        .dyn_into::<IntersectionObserverEntry>()
                        .map(|entry| entry.is_intersecting())
                        .unwrap_or(false)
                });
                if visible {
                    observer.disconnect();
                    if let Some(on_visible) = on_visible.take() {
                        on_visible();
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
        observer.observe(target);

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ViewObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
