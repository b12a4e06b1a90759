use super::{
    dom::{self, EventListener, Interval, ViewObserver},
    Theme,
};
use crate::{
    content::{portfolio, AchievementBrowser, AchievementCategory, Category, METRIC_ROTATION_MS},
    trail::Hsl,
};
use std::{cell::Cell, rc::Rc};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlScriptElement, MouseEvent};
use yew::prelude::*;

const NAV_ITEMS: [(&str, &str); 6] = [
    ("home", "Home"),
    ("skills", "Skills"),
    ("projects", "Projects"),
    ("education", "Education"),
    ("achievements", "Achievements"),
    ("contact", "Contact"),
];
const SCROLLED_THRESHOLD_PX: f64 = 50.0;
const ACTIVE_SECTION_LINE_PX: f64 = 100.0;
const SCROLL_OFFSET_PX: f64 = 120.0;
const CALENDLY_SCRIPT_SRC: &str = "https://assets.calendly.com/assets/external/widget.js";

fn active_section() -> Option<&'static str> {
    NAV_ITEMS.iter().map(|(id, _)| *id).find(|id| {
        dom::element_by_id(id).is_some_and(|element| {
            let rect = element.get_bounding_client_rect();
            rect.top() <= ACTIVE_SECTION_LINE_PX && rect.bottom() >= ACTIVE_SECTION_LINE_PX
        })
    })
}

fn scroll_callback(id: &'static str, smooth: bool, after: Option<Callback<()>>) -> Callback<MouseEvent> {
    Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        dom::scroll_to_element(id, SCROLL_OFFSET_PX, smooth);
        if let Some(after) = after.as_ref() {
            after.emit(());
        }
    })
}

fn resume_link(class: &'static str) -> Html {
    let profile = &portfolio().profile;
    html! {
        <a class={class} href={profile.resume_path} download={profile.resume_file_name} target="_blank">
            {"Resume"}
        </a>
    }
}

#[derive(Properties, PartialEq)]
pub struct NavigationProps {
    pub theme: Theme,
    pub on_toggle: Callback<()>,
    pub smooth: bool,
}

#[function_component(Navigation)]
pub fn navigation(props: &NavigationProps) -> Html {
    let scrolled = use_state_eq(|| false);
    let active = use_state_eq(|| "home");
    let menu_open = use_state_eq(|| false);

    {
        let scrolled = scrolled.clone();
        let active = active.clone();
        use_effect_with((), move |_| {
            let listener = EventListener::on_window("scroll", move |_| {
                scrolled.set(dom::scroll_y() > SCROLLED_THRESHOLD_PX);
                if let Some(id) = active_section() {
                    active.set(id);
                }
            });
            move || drop(listener)
        });
    }

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: ()| menu_open.set(false))
    };
    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };
    let on_theme = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(()))
    };

    let links = |class: &'static str| -> Html {
        NAV_ITEMS
            .iter()
            .map(|&(id, label)| {
                let current = *active == id;
                html! {
                    <a
                        class={classes!(class, current.then_some("is-active"))}
                        href={format!("#{id}")}
                        aria-current={current.then_some("location")}
                        onclick={scroll_callback(id, props.smooth, Some(close_menu.clone()))}
                    >
                        {label}
                    </a>
                }
            })
            .collect()
    };

    let profile = &portfolio().profile;

    html! {
        <header class={classes!("site-header", scrolled.then_some("is-scrolled"))}>
            <nav class="nav" aria-label="Primary">
                <a class="nav-brand" href="#home" onclick={scroll_callback("home", props.smooth, None)}>
                    {profile.initials}
                </a>
                <div class="nav-links">{links("nav-link")}</div>
                <div class="nav-actions">
                    {resume_link("button button-outline nav-resume")}
                    <button
                        class="theme-toggle"
                        type="button"
                        aria-label={props.theme.toggle_label()}
                        aria-pressed={props.theme.is_dark().to_string()}
                        onclick={on_theme}
                    >
                        <span aria-hidden="true">{props.theme.icon()}</span>
                    </button>
                    <button
                        class="nav-menu-toggle"
                        type="button"
                        aria-label="Toggle menu"
                        aria-expanded={menu_open.to_string()}
                        onclick={toggle_menu}
                    >
                        <span aria-hidden="true">{if *menu_open { "×" } else { "☰" }}</span>
                    </button>
                </div>
            </nav>
            if *menu_open {
                <div class="nav-mobile">{links("nav-mobile-link")}</div>
            }
        </header>
    }
}

/// Floating headline number in the hero, cycling every few seconds. Desktop only via CSS.
#[function_component(MetricsTicker)]
fn metrics_ticker() -> Html {
    let index = use_state_eq(|| 0_usize);
    let data = portfolio();

    {
        let index = index.clone();
        use_effect_with((), move |_| {
            let current = Rc::new(Cell::new(0_usize));
            let ticker = Interval::new(METRIC_ROTATION_MS, move || {
                let next = portfolio().next_metric(current.get());
                current.set(next);
                index.set(next);
            });
            move || drop(ticker)
        });
    }

    let Some(metric) = data.metrics.get(*index) else {
        return Html::default();
    };

    html! {
        <div class="metrics-ticker" aria-live="polite" aria-atomic="true">
            <div class="metric-text">
                <span class="metric-label">{metric.label}</span>
                <span class="metric-value">{metric.value}</span>
            </div>
            if let Some(note) = metric.note {
                <span class="badge">{note}</span>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub smooth: bool,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let data = portfolio();
    let profile = &data.profile;
    let socials = ["github", "linkedin", "leetcode"]
        .into_iter()
        .filter_map(|platform| data.social(platform));

    html! {
        <section id="home" class="hero" aria-labelledby="hero-heading">
            <MetricsTicker />
            <p class="hero-eyebrow">{profile.title}</p>
            <h1 id="hero-heading">{profile.name}</h1>
            <p class="hero-tagline">{profile.tagline}</p>
            <p class="hero-description muted">{profile.description}</p>
            <div class="hero-actions">
                <a class="button button-primary" href="#projects" onclick={scroll_callback("projects", props.smooth, None)}>
                    {"View My Work"}
                </a>
                <a class="button button-outline" href="#contact" onclick={scroll_callback("contact", props.smooth, None)}>
                    {"Get In Touch"}
                </a>
            </div>
            <ul class="hero-social">
                { for socials.map(|link| html! {
                    <li>
                        <a href={link.url} target="_blank" rel="noopener noreferrer" aria-label={link.platform}>
                            {link.handle}
                        </a>
                    </li>
                }) }
            </ul>
        </section>
    }
}

#[function_component(Skills)]
pub fn skills() -> Html {
    let data = portfolio();

    html! {
        <section id="skills" class="section-block" aria-labelledby="skills-heading">
            <h2 id="skills-heading">{"Skills & Expertise"}</h2>
            <div class="skill-columns">
                { for [Category::Web, Category::Aiml].into_iter().map(|category| html! {
                    <div class="skill-group">
                        <h3>{category.heading()}</h3>
                        <ul class="skill-list">
                            { for data.skills_in(category).map(|skill| html! {
                                <li class="skill">
                                    <span>{skill.name}</span>
                                    if let Some(level) = skill.proficiency {
                                        <span class="skill-bar" role="meter" aria-valuenow={level.to_string()} aria-valuemin="0" aria-valuemax="100">
                                            <span class="skill-bar-fill" style={format!("width: {level}%;")} />
                                        </span>
                                    }
                                </li>
                            }) }
                        </ul>
                    </div>
                }) }
            </div>
        </section>
    }
}

#[function_component(Process)]
pub fn process() -> Html {
    html! {
        <section id="process" class="section-block" aria-labelledby="process-heading">
            <h2 id="process-heading">{"ML Model Lifecycle"}</h2>
            <p class="muted">{"End-to-end process from raw data to production-ready AI systems"}</p>
            <ol class="process-timeline">
                { for portfolio().process.iter().enumerate().map(|(index, step)| html! {
                    <li class={classes!("process-step", (index % 2 == 1).then_some("is-right"))} key={step.id}>
                        <span class="process-marker" aria-hidden="true">{index + 1}</span>
                        <article class="process-card">
                            <h3>{step.title}</h3>
                            <p class="muted">{step.description}</p>
                            <ul class="tag-list" aria-label="Tools">
                                { for step.tools.iter().map(|tool| html! { <li class="tag">{*tool}</li> }) }
                            </ul>
                            <ul class="process-artifacts" aria-label="Artifacts">
                                { for step.artifacts.iter().map(|artifact| html! { <li>{*artifact}</li> }) }
                            </ul>
                        </article>
                    </li>
                }) }
            </ol>
        </section>
    }
}

#[function_component(Education)]
pub fn education() -> Html {
    html! {
        <section id="education" class="section-block" aria-labelledby="education-heading">
            <h2 id="education-heading">{"Education"}</h2>
            <ol class="timeline">
                { for portfolio().education.iter().map(|entry| html! {
                    <li class="timeline-entry" key={entry.id}>
                        <h3>{entry.institution}</h3>
                        <p>{entry.degree}</p>
                        <p class="muted">
                            <span>{entry.period}</span>
                            <span class="timeline-score">{entry.score}</span>
                        </p>
                    </li>
                }) }
            </ol>
        </section>
    }
}

#[function_component(Resume)]
pub fn resume() -> Html {
    html! {
        <section id="resume" class="section-block" aria-labelledby="resume-heading">
            <h2 id="resume-heading">{"Download My Resume"}</h2>
            <p class="muted">
                {"Get a detailed overview of my experience, skills, and projects. Choose a tailored version for your needs."}
            </p>
            <div class="resume-options">
                { for portfolio().resumes.iter().map(|variant| html! {
                    <a
                        class="button button-outline"
                        href={variant.path}
                        download={variant.file_name()}
                        target="_blank"
                    >
                        {variant.focus.label()}
                    </a>
                }) }
            </div>
        </section>
    }
}

#[function_component(Achievements)]
pub fn achievements() -> Html {
    let browser = use_state(AchievementBrowser::default);
    let all = portfolio().achievements;

    let on_search = {
        let browser = browser.clone();
        Callback::from(move |event: InputEvent| {
            let field: HtmlInputElement = event.target_unchecked_into();
            browser.set(browser.with_query(field.value()));
        })
    };
    let on_more = {
        let browser = browser.clone();
        Callback::from(move |_: MouseEvent| browser.set(browser.load_more()))
    };

    let filter_button = |category: Option<AchievementCategory>, label: &'static str| {
        let selected = browser.category() == category;
        let onclick = {
            let browser = browser.clone();
            Callback::from(move |_: MouseEvent| browser.set(browser.with_category(category)))
        };
        html! {
            <button
                type="button"
                class={classes!("filter-tab", selected.then_some("is-active"))}
                aria-pressed={selected.to_string()}
                onclick={onclick}
            >
                {label}
            </button>
        }
    };

    let visible = browser.visible(all);

    html! {
        <section id="achievements" class="section-block" aria-labelledby="achievements-heading">
            <h2 id="achievements-heading">{"Achievements"}</h2>
            <div class="achievement-controls">
                <input
                    class="achievement-search"
                    type="search"
                    placeholder="Search achievements..."
                    aria-label="Search achievements"
                    value={browser.query().to_string()}
                    oninput={on_search}
                />
                <div class="filter-tabs">
                    {filter_button(None, "All")}
                    { for AchievementCategory::ALL.into_iter().map(|category| filter_button(Some(category), category.label())) }
                </div>
            </div>
            if visible.is_empty() {
                <p class="muted achievement-empty">{"No achievements match your search."}</p>
            } else {
                <ul class="achievement-grid">
                    { for visible.into_iter().map(|achievement| html! {
                        <li class="achievement" key={achievement.id}>
                            <span class="achievement-icon" aria-hidden="true">{achievement.icon.glyph()}</span>
                            <h3>{achievement.title}</h3>
                            <p class="muted">{achievement.description}</p>
                            if let Some(proof) = achievement.proof_link {
                                <a class="achievement-proof" href={proof} target="_blank" rel="noopener noreferrer">
                                    {"View proof"}
                                </a>
                            }
                        </li>
                    }) }
                </ul>
            }
            if browser.has_more(all) {
                <button class="button button-outline achievement-more" type="button" onclick={on_more}>
                    {"Load more"}
                </button>
            }
        </section>
    }
}

fn calendly_url(dark: bool) -> String {
    let primary = dom::root_css_variable("--primary")
        .map(|raw| Hsl::parse_or_fallback(&raw))
        .unwrap_or(Hsl::FALLBACK)
        .to_hex();
    let background = if dark { "transparent" } else { "ffffff" };
    format!(
        "{}?hide_event_type_details=1&hide_landing_page_details=1&hide_gdpr_banner=1&background_color={background}&primary_color={primary}",
        portfolio().profile.scheduling_url
    )
}

fn append_calendly_script() -> Option<HtmlScriptElement> {
    let document = dom::document()?;
    let script = document
        .create_element("script")
        .ok()?
        .dyn_into::<HtmlScriptElement>()
        .ok()?;
    script.set_src(CALENDLY_SCRIPT_SRC);
    script.set_async(true);
    document.body()?.append_child(&script).ok()?;
    Some(script)
}

#[derive(Properties, PartialEq)]
struct CalendlyProps {
    dark: bool,
}

/// Inline scheduler; the third-party script loads only once the embed scrolls into view.
#[function_component(CalendlyEmbed)]
fn calendly_embed(props: &CalendlyProps) -> Html {
    let embed = use_node_ref();
    let in_view = use_state_eq(|| false);

    {
        let embed = embed.clone();
        let in_view = in_view.clone();
        use_effect_with((), move |_| {
            let observer = embed.cast::<Element>().and_then(|element| {
                ViewObserver::once(&element, "0px 0px -100px 0px", move || in_view.set(true))
            });
            move || drop(observer)
        });
    }

    use_effect_with(*in_view, |&visible| {
        let script = if visible { append_calendly_script() } else { None };
        move || {
            if let Some(script) = script {
                script.remove();
            }
        }
    });

    html! {
        <div class="calendly-frame" ref={embed}>
            if *in_view {
                <div class="calendly-inline-widget" data-url={calendly_url(props.dark)} />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactProps {
    pub dark: bool,
}

#[function_component(Contact)]
pub fn contact(props: &ContactProps) -> Html {
    let data = portfolio();
    let profile = &data.profile;

    html! {
        <section id="contact" class="section-block" aria-labelledby="contact-heading">
            <h2 id="contact-heading">{"Let's Work Together"}</h2>
            <p class="muted">{"Have a project in mind or want to talk about AI and the web? Book a call or drop me a line."}</p>
            <div class="contact-grid">
                <div class="contact-card">
                    <h3>{"Book a Call"}</h3>
                    <CalendlyEmbed dark={props.dark} />
                </div>
                <div class="contact-card">
                    <h3>{"Reach Out"}</h3>
                    <a class="contact-email" href={format!("mailto:{}", profile.email)}>{profile.email}</a>
                    <ul class="contact-social">
                        { for data.social.iter().filter(|link| link.platform != "email").map(|link| html! {
                            <li>
                                <a href={link.url} target="_blank" rel="noopener noreferrer">
                                    <span class="contact-platform">{link.platform}</span>
                                    <span class="muted">{link.handle}</span>
                                </a>
                            </li>
                        }) }
                    </ul>
                    {resume_link("button button-primary contact-resume")}
                </div>
            </div>
        </section>
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    let year = js_sys::Date::new_0().get_full_year();
    let profile = &portfolio().profile;

    html! {
        <footer class="site-footer">
            <p class="muted">{format!("© {year} {}. All rights reserved.", profile.name)}</p>
        </footer>
    }
}
