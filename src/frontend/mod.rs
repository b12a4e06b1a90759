mod chatbot;
mod dom;
mod effects;
mod hooks;
mod projects;
mod sections;

use chatbot::Chatbot;
use effects::{CursorTrailLayer, NeuralBackground};
use hooks::use_motion_preferences;
use js_sys::{Function, Reflect};
use projects::{CaseStudies, Projects};
use sections::{Achievements, Contact, Education, Footer, Hero, Navigation, Process, Resume, Skills};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::HtmlLinkElement;
use yew::prelude::*;

const THEME_KEY: &str = "theme";
const FAVICON_ID: &str = "favicon-dynamic";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }

    fn favicon(self) -> &'static str {
        match self {
            Self::Light => "/favicon-light.svg",
            Self::Dark => "/favicon-dark.svg",
        }
    }
}

fn read_stored_theme() -> Option<Theme> {
    let value = dom::local_storage()?.get_item(THEME_KEY).ok().flatten()?;
    Theme::from_str(&value)
}

fn resolve_theme() -> Theme {
    read_stored_theme().unwrap_or_else(|| {
        if dom::media_matches("(prefers-color-scheme: dark)") {
            Theme::Dark
        } else {
            Theme::Light
        }
    })
}

fn persist_theme(theme: Theme) {
    if let Some(storage) = dom::local_storage() {
        let _ = storage.set_item(THEME_KEY, theme.as_str());
    }
}

fn apply_theme(theme: Theme) {
    if let Some(root) = dom::document().and_then(|document| document.document_element()) {
        let _ = root.set_attribute("data-theme", theme.as_str());
        let classes = root.class_list();
        let _ = if theme.is_dark() {
            classes.add_1("dark")
        } else {
            classes.remove_1("dark")
        };
    }
}

/// Swaps the theme inside `document.startViewTransition` when the browser has it.
fn apply_theme_with_transition(theme: Theme, animate: bool) {
    let Some(document) = dom::document().filter(|_| animate) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || apply_theme(theme));
    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

fn sync_favicon(theme: Theme) {
    let Some(document) = dom::document() else {
        return;
    };

    let link = match document.get_element_by_id(FAVICON_ID) {
        Some(existing) => existing.dyn_into::<HtmlLinkElement>().ok(),
        None => document
            .create_element("link")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlLinkElement>().ok())
            .inspect(|link| {
                link.set_id(FAVICON_ID);
                link.set_rel("icon");
                link.set_type("image/svg+xml");
                if let Some(head) = document.head() {
                    let _ = head.append_child(link);
                }
            }),
    };

    if let Some(link) = link {
        link.set_href(theme.favicon());
    }
}

#[function_component(App)]
fn app() -> Html {
    let theme = use_state_eq(resolve_theme);
    let preferences = use_motion_preferences();

    use_effect_with(*theme, |&current| {
        apply_theme(current);
        sync_favicon(current);
        || ()
    });

    let on_toggle = {
        let theme = theme.clone();
        let animate = preferences.animations_enabled();
        Callback::from(move |_| {
            let next = (*theme).toggled();
            persist_theme(next);
            apply_theme_with_transition(next, animate);
            theme.set(next);
        })
    };

    let dark = theme.is_dark();
    let smooth = preferences.smooth_scroll();

    html! {
        <>
            <a class="skip-link" href="#content">{"Skip to main content"}</a>
            <NeuralBackground dark={dark} />
            <CursorTrailLayer dark={dark} />
            <Navigation theme={*theme} on_toggle={on_toggle} smooth={smooth} />
            <main id="content">
                <Hero smooth={smooth} />
                <Skills />
                <Projects />
                <CaseStudies />
                <Process />
                <Education />
                <Achievements />
                <Resume />
                <Contact dark={dark} />
            </main>
            <Footer />
            <Chatbot />
        </>
    }
}

pub fn run() {
    match dom::element_by_id("app") {
        Some(root) => yew::Renderer::<App>::with_root(root).render(),
        None => yew::Renderer::<App>::new().render(),
    };
}
