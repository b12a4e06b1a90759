use super::dom::{self, AnimationFrame, EventListener, Timeout};
use crate::motion::{
    ContainerGeometry, MotionPreferences, ScrollSampler, ViewportClass, RESIZE_DEBOUNCE_MS,
};
use std::{cell::RefCell, rc::Rc};
use web_sys::Element;
use yew::prelude::*;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
const COARSE_POINTER_QUERY: &str = "(pointer: coarse)";

fn read_motion_preferences() -> MotionPreferences {
    MotionPreferences {
        reduced_motion: dom::media_matches(REDUCED_MOTION_QUERY),
        coarse_pointer: dom::media_matches(COARSE_POINTER_QUERY),
    }
}

fn read_viewport_class() -> ViewportClass {
    let (width, _) = dom::viewport_size();
    ViewportClass::from_width(width)
}

/// Live motion preferences; consumers re-render the moment either media query flips.
#[hook]
pub fn use_motion_preferences() -> MotionPreferences {
    let preferences = use_state_eq(read_motion_preferences);

    {
        let preferences = preferences.clone();
        use_effect_with((), move |_| {
            let listeners: Vec<EventListener> = [REDUCED_MOTION_QUERY, COARSE_POINTER_QUERY]
                .into_iter()
                .filter_map(|query| {
                    let list = dom::media_query(query)?;
                    let preferences = preferences.clone();
                    EventListener::new(&list, "change", move |_| {
                        preferences.set(read_motion_preferences());
                    })
                })
                .collect();

            move || drop(listeners)
        });
    }

    *preferences
}

/// Desktop vs. narrow layout, re-evaluated after resizing settles.
#[hook]
pub fn use_viewport_class() -> ViewportClass {
    let class = use_state_eq(read_viewport_class);

    {
        let class = class.clone();
        use_effect_with((), move |_| {
            let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
            let listener = {
                let pending = pending.clone();
                EventListener::on_window("resize", move |_| {
                    let class = class.clone();
                    let timeout = Timeout::new(RESIZE_DEBOUNCE_MS, move || class.set(read_viewport_class()));
                    // Replacing the previous timeout cancels it.
                    *pending.borrow_mut() = timeout;
                })
            };

            move || {
                drop(listener);
                pending.borrow_mut().take();
            }
        });
    }

    *class
}

fn container_geometry(container: &NodeRef) -> Option<ContainerGeometry> {
    let rect = container.cast::<Element>()?.get_bounding_client_rect();
    let (_, viewport_height) = dom::viewport_size();
    Some(ContainerGeometry {
        top: rect.top(),
        height: rect.height(),
        viewport_height,
    })
}

/// Scroll progress of `container` through the viewport, sampled at most once per frame.
/// Nothing is subscribed while `preferences` rule out scroll tracking; progress then reads 0.
#[hook]
pub fn use_scroll_progress(container: NodeRef, preferences: MotionPreferences) -> f64 {
    let progress = use_state_eq(|| 0.0_f64);
    let tracking = preferences.tracks_scroll();

    {
        let progress = progress.clone();
        use_effect_with((container, tracking), move |(container, tracking)| {
            let container = container.clone();
            if !*tracking {
                progress.set(0.0);
            }
            let sampler = Rc::new(RefCell::new(ScrollSampler::default()));
            let frame: Rc<RefCell<Option<AnimationFrame>>> = Rc::new(RefCell::new(None));

            let schedule: Rc<dyn Fn()> = {
                let sampler = sampler.clone();
                let frame = frame.clone();
                Rc::new(move || {
                    if !sampler.borrow_mut().request() {
                        return;
                    }

                    let next = {
                        let sampler = sampler.clone();
                        let container = container.clone();
                        let progress = progress.clone();
                        AnimationFrame::request(move |_| {
                            let value = sampler.borrow_mut().sample(container_geometry(&container));
                            progress.set(value);
                        })
                    };
                    if next.is_none() {
                        sampler.borrow_mut().cancel();
                    }
                    *frame.borrow_mut() = next;
                })
            };

            let listeners: Vec<EventListener> = if *tracking {
                let listeners = ["scroll", "resize"]
                    .into_iter()
                    .filter_map(|event| {
                        let schedule = schedule.clone();
                        EventListener::on_window(event, move |_| schedule())
                    })
                    .collect();
                schedule();
                listeners
            } else {
                Vec::new()
            };

            move || {
                drop(listeners);
                frame.borrow_mut().take();
                sampler.borrow_mut().cancel();
            }
        });
    }

    *progress
}
