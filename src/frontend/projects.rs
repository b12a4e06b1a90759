use super::hooks::{use_motion_preferences, use_scroll_progress, use_viewport_class};
use crate::{
    content::{portfolio, Category, Project, ProjectFilter},
    motion::{MotionPreferences, ProgressRail, StackConfig, ViewportClass},
};
use yew::prelude::*;

fn category_glyph(category: Category) -> &'static str {
    match category {
        Category::Web => "◎",
        Category::Aiml => "✦",
    }
}

fn project_links(project: &Project) -> Html {
    if project.links.is_empty() {
        return html! {
            <span class="muted card-links-empty">{"Source code available upon request"}</span>
        };
    }

    let link = |href: Option<&'static str>, label: &'static str, class: &'static str| {
        href.map(|href| {
            html! {
                <a class={classes!("button", class)} href={href} target="_blank" rel="noopener noreferrer">
                    {label}
                    <span class="sr-only">{" (opens in a new tab)"}</span>
                </a>
            }
        })
    };

    html! {
        <div class="card-links">
            {link(project.links.source, "Source Code", "button-outline")}
            {link(project.links.demo, "Live Demo", "button-primary")}
            {link(project.links.model_card, "Model Card", "button-outline")}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct StackedCardProps {
    project: &'static Project,
    index: usize,
    total: usize,
    progress: f64,
    viewport: ViewportClass,
    preferences: MotionPreferences,
}

#[function_component(StackedCard)]
fn stacked_card(props: &StackedCardProps) -> Html {
    let transform = StackConfig::default().card_transform(
        props.progress,
        props.index,
        props.total,
        props.viewport,
        props.preferences,
    );
    let layout = props.viewport.layout();
    let project = props.project;

    html! {
        <div class="stack-slot" style={layout.card_style(props.index)}>
            <article
                class={classes!("stack-card", (props.viewport == ViewportClass::Narrow).then_some("is-narrow"))}
                style={transform.to_css()}
                aria-labelledby={format!("project-{}", project.id)}
            >
                <div class={classes!("stack-visual", format!("gradient-{}", project.id))}>
                    <div class="stack-icon" style={transform.icon_css()} aria-hidden="true">
                        {category_glyph(project.category)}
                    </div>
                    <span class="badge stack-category">{project.category.label()}</span>
                    <span class="stack-period">{project.period}</span>
                    <span class="stack-number" aria-hidden="true">{format!("{:02}", props.index + 1)}</span>
                </div>
                <div class="stack-body">
                    <h3 id={format!("project-{}", project.id)}>{project.title}</h3>
                    <p class="muted">{project.description}</p>
                    <ul class="tag-list" aria-label="Technologies">
                        { for project.technologies.iter().map(|tech| html! { <li class="tag">{*tech}</li> }) }
                    </ul>
                    <ul class="highlight-list">
                        { for project.highlights.iter().take(3).map(|highlight| html! { <li>{*highlight}</li> }) }
                    </ul>
                    {project_links(project)}
                </div>
            </article>
        </div>
    }
}

/// Featured projects as a scroll-driven stack of sticky cards.
#[function_component(Projects)]
pub fn projects() -> Html {
    let container = use_node_ref();
    let preferences = use_motion_preferences();
    let progress = use_scroll_progress(container.clone(), preferences);
    let viewport = use_viewport_class();
    let projects = portfolio().projects;
    let total = projects.len();
    let rail = ProgressRail::at(progress);

    html! {
        <section id="projects" class="projects-section" ref={container}>
            if ProgressRail::visible(viewport, preferences) {
                <div class="progress-rail" aria-hidden="true">
                    <div class="progress-track">
                        <div class="progress-fill" style={format!("height: {:.2}%;", rail.fill_percent)} />
                    </div>
                    <span class="progress-count" style={format!("opacity: {:.3};", rail.label_opacity)}>{total}</span>
                </div>
            }
            <div class="projects-header">
                <h2>{"Featured Projects"}</h2>
                <p class="muted">{"A selection of my best work in AI/ML and full-stack development"}</p>
            </div>
            <div class={classes!("stack", (viewport == ViewportClass::Narrow).then_some("is-narrow"))}>
                { for projects.iter().enumerate().map(|(index, project)| html! {
                    <StackedCard
                        key={project.id}
                        project={project}
                        index={index}
                        total={total}
                        progress={progress}
                        viewport={viewport}
                        preferences={preferences}
                    />
                }) }
            </div>
        </section>
    }
}

/// Problem / solution / impact write-ups, filterable by category.
#[function_component(CaseStudies)]
pub fn case_studies() -> Html {
    let filter = use_state_eq(ProjectFilter::default);
    let data = portfolio();

    let tabs = ProjectFilter::ALL.into_iter().map(|option| {
        let onclick = {
            let filter = filter.clone();
            Callback::from(move |_| filter.set(option))
        };
        let selected = *filter == option;
        html! {
            <button
                type="button"
                role="tab"
                class={classes!("filter-tab", selected.then_some("is-active"))}
                aria-selected={selected.to_string()}
                onclick={onclick}
            >
                {option.label()}
                <span class="filter-count">{option.count(data)}</span>
            </button>
        }
    });

    let studies = data
        .projects_matching(*filter)
        .filter(|project| project.problem.is_some() || project.solution.is_some() || !project.impact.is_empty())
        .map(|project| {
            html! {
                <article class="case-study" key={project.id}>
                    <header>
                        <span class="badge">{project.category.label()}</span>
                        <h3>{project.title}</h3>
                    </header>
                    if let Some(problem) = project.problem {
                        <div class="case-block">
                            <h4>{"The Problem"}</h4>
                            <p class="muted">{problem}</p>
                        </div>
                    }
                    if let Some(solution) = project.solution {
                        <div class="case-block">
                            <h4>{"The Solution"}</h4>
                            <p class="muted">{solution}</p>
                        </div>
                    }
                    if !project.impact.is_empty() {
                        <dl class="impact-grid">
                            { for project.impact.iter().map(|impact| html! {
                                <div class="impact">
                                    <dt>{impact.metric}</dt>
                                    <dd>{impact.value}</dd>
                                </div>
                            }) }
                        </dl>
                    }
                    <ul class="tag-list" aria-label="Technologies">
                        { for project.technologies.iter().map(|tech| html! { <li class="tag">{*tech}</li> }) }
                    </ul>
                </article>
            }
        });

    html! {
        <section id="case-studies" class="section-block" aria-labelledby="case-studies-heading">
            <h2 id="case-studies-heading">{"Case Studies"}</h2>
            <div class="filter-tabs" role="tablist">
                { for tabs }
            </div>
            <div class="case-study-list">
                { for studies }
            </div>
        </section>
    }
}
