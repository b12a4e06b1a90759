//! Decorative layers behind the page: the particle network and the cursor trail.

use super::{
    dom::{self, EventListener, FrameLoop},
    hooks::use_motion_preferences,
};
use crate::{
    scene::{NeuralScene, NODE_COUNT},
    trail::{CursorTrail, Hsl, Point, TRAIL_POINTS},
};
use std::{cell::RefCell, f64::consts::TAU, rc::Rc};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent};
use yew::prelude::*;

fn theme_color(property: &str) -> Hsl {
    dom::root_css_variable(property)
        .map(|raw| Hsl::parse_or_fallback(&raw))
        .unwrap_or(Hsl::FALLBACK)
}

fn hsla(color: Hsl, alpha: f64) -> String {
    format!("hsl({:.0} {:.0}% {:.0}% / {:.2})", color.h, color.s, color.l, alpha)
}

#[derive(Properties, PartialEq)]
pub struct EffectProps {
    pub dark: bool,
}

fn trail_dots(container: &NodeRef) -> Vec<HtmlElement> {
    let Some(container) = container.cast::<HtmlElement>() else {
        return Vec::new();
    };
    let children = container.children();
    (0..children.length())
        .filter_map(|index| children.item(index))
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect()
}

#[function_component(CursorTrailLayer)]
pub fn cursor_trail_layer(props: &EffectProps) -> Html {
    let container = use_node_ref();
    let enabled = use_motion_preferences().cursor_trail_enabled();

    {
        let container = container.clone();
        use_effect_with((enabled, props.dark), move |&(enabled, dark)| {
            let mut listener = None;
            let frames: Rc<RefCell<Option<FrameLoop>>> = Rc::new(RefCell::new(None));

            if enabled {
                let dots = Rc::new(trail_dots(&container));
                let base = theme_color("--cursor-trail");
                for (index, dot) in dots.iter().enumerate() {
                    let _ = dot
                        .style()
                        .set_property("background-color", &CursorTrail::color(index, dots.len(), base, dark));
                }

                let (width, height) = dom::viewport_size();
                let trail = Rc::new(RefCell::new(CursorTrail::new(Point {
                    x: width / 2.0,
                    y: height / 2.0,
                })));

                let frames = frames.clone();
                listener = EventListener::on_window("pointermove", move |event| {
                    let Some(event) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    let first_move = trail
                        .borrow_mut()
                        .pointer_moved(f64::from(event.client_x()), f64::from(event.client_y()));
                    if !first_move {
                        return;
                    }

                    let trail = trail.clone();
                    let dots = dots.clone();
                    *frames.borrow_mut() = FrameLoop::start(move |_| {
                        let points = trail.borrow_mut().step();
                        for (index, (dot, point)) in dots.iter().zip(points).enumerate() {
                            let _ = dot
                                .style()
                                .set_property("transform", &CursorTrail::transform(point, index, dots.len()));
                        }
                    });
                });
            }

            move || {
                drop(listener);
                frames.borrow_mut().take();
            }
        });
    }

    if !enabled {
        return html! {};
    }

    html! {
        <div class="cursor-trail" ref={container} aria-hidden="true">
            { for (0..TRAIL_POINTS).map(|index| html! { <div class="trail-dot" key={index} /> }) }
        </div>
    }
}

struct CanvasView {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasView {
    fn attach(node: &NodeRef) -> Option<Self> {
        let canvas = node.cast::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        let view = Self { canvas, context };
        view.fit_viewport();
        Some(view)
    }

    fn fit_viewport(&self) {
        let (width, height) = dom::viewport_size();
        self.canvas.set_width(width.max(1.0) as u32);
        self.canvas.set_height(height.max(1.0) as u32);
    }

    fn draw(&self, scene: &NeuralScene, color: Hsl, dark: bool) {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        let context = &self.context;
        context.clear_rect(0.0, 0.0, width, height);

        let projected: Vec<_> = scene
            .nodes()
            .iter()
            .map(|node| scene.project(*node, width, height))
            .collect();

        let (edge_alpha, node_alpha) = if dark { (0.18, 0.7) } else { (0.12, 0.55) };
        context.set_line_width(1.0);
        context.set_stroke_style_str(&hsla(color, edge_alpha));
        context.begin_path();
        for &(from, to) in scene.edges() {
            if let (Some(Some(a)), Some(Some(b))) = (projected.get(from), projected.get(to)) {
                context.move_to(a.x, a.y);
                context.line_to(b.x, b.y);
            }
        }
        context.stroke();

        context.set_fill_style_str(&hsla(color, node_alpha));
        for point in projected.iter().flatten() {
            context.begin_path();
            if context.arc(point.x, point.y, point.radius.max(0.5), 0.0, TAU).is_ok() {
                context.fill();
            }
        }
    }
}

/// Full-viewport canvas with a slowly orbiting node graph.
#[function_component(NeuralBackground)]
pub fn neural_background(props: &EffectProps) -> Html {
    let canvas = use_node_ref();
    let animate = use_motion_preferences().animations_enabled();

    {
        let canvas = canvas.clone();
        use_effect_with((animate, props.dark), move |&(animate, dark)| {
            let mut resize = None;
            let mut frames = None;

            if let Some(view) = CanvasView::attach(&canvas) {
                let view = Rc::new(view);
                let scene = Rc::new(RefCell::new(NeuralScene::generate(NODE_COUNT, dom::random)));
                let color = theme_color("--primary");
                view.draw(&scene.borrow(), color, dark);

                resize = {
                    let view = view.clone();
                    let scene = scene.clone();
                    EventListener::on_window("resize", move |_| {
                        view.fit_viewport();
                        view.draw(&scene.borrow(), color, dark);
                    })
                };

                if animate {
                    let mut last_timestamp: Option<f64> = None;
                    frames = FrameLoop::start(move |timestamp| {
                        let hidden = dom::document().map(|document| document.hidden()).unwrap_or(false);
                        if hidden {
                            last_timestamp = None;
                            return;
                        }

                        let delta = last_timestamp.map(|last| (timestamp - last) / 1000.0).unwrap_or(0.0);
                        last_timestamp = Some(timestamp);
                        scene.borrow_mut().advance(delta);
                        view.draw(&scene.borrow(), color, dark);
                    });
                }
            }

            move || {
                drop(frames);
                drop(resize);
            }
        });
    }

    html! {
        <canvas class="neural-background" ref={canvas} aria-hidden="true" />
    }
}
