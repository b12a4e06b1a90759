//! Server-side half of the chat widget: one completion call per user message.

use super::{config::ChatConfig, error::ApiError, error::ServerError};
use crate::{
    chat::{ChatMessage, Role, EMPTY_REPLY},
    content::{Category, Portfolio},
};
use futures_util::StreamExt;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tokio::time::Instant;

const USER_AGENT: &str = "portfolio-assistant/1.0";

pub struct Assistant {
    client: reqwest::Client,
    config: ChatConfig,
    system_prompt: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

impl Assistant {
    pub fn new(config: ChatConfig, portfolio: &Portfolio) -> Result<Self, ServerError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            system_prompt: system_prompt(portfolio),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// `history` must already be validated; the system prompt is prepended here.
    pub async fn reply(&self, history: Vec<ChatMessage>, request_id: &str) -> Result<String, ApiError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(ApiError::AssistantUnavailable);
        };

        let started_at = Instant::now();
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage {
            role: Role::System,
            content: self.system_prompt.clone(),
        });
        messages.extend(history);

        let body = CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(self.config.api_url.clone())
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .json(&body)
            .send()
            .await
            .map_err(|error| {
                tracing::warn!(event = "assistant_upstream_unreachable", request_id, error = %error);
                ApiError::Upstream(if error.is_timeout() {
                    "request timed out"
                } else {
                    "request failed"
                })
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                event = "assistant_upstream_status",
                request_id,
                status = status.as_u16(),
                duration_ms = started_at.elapsed().as_millis() as u64,
            );
            return Err(ApiError::Upstream("received non-success response"));
        }

        let raw = read_limited_body(response, self.config.response_max_bytes)
            .await
            .map_err(ApiError::Upstream)?;
        let parsed: CompletionResponse =
            serde_json::from_str(&raw).map_err(|_| ApiError::Upstream("malformed completion body"))?;

        tracing::info!(
            event = "assistant_reply",
            request_id,
            model = %self.config.model,
            duration_ms = started_at.elapsed().as_millis() as u64,
        );

        Ok(first_reply(parsed))
    }
}

fn first_reply(response: CompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| EMPTY_REPLY.to_string())
}

async fn read_limited_body(response: reqwest::Response, max_bytes: usize) -> Result<String, &'static str> {
    let mut stream = response.bytes_stream();
    let mut body: Vec<u8> = Vec::with_capacity(4096);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|_| "failed reading response body")?;
        if body.len() + chunk.len() > max_bytes {
            return Err("response body too large");
        }
        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).to_string())
}

/// Grounds the model in the portfolio content and nothing else.
pub fn system_prompt(portfolio: &Portfolio) -> String {
    let profile = &portfolio.profile;
    let name = profile.name;
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are {name}'s AI assistant on his portfolio website. Answer questions about {name}'s background briefly and accurately. Be friendly but concise - keep responses under 100 words unless more detail is specifically requested."
    );
    let _ = writeln!(prompt, "\nABOUT {}:", name.to_uppercase());
    let _ = writeln!(prompt, "- {}", profile.title);
    if let Some(current) = portfolio.education.first() {
        let _ = writeln!(
            prompt,
            "- {} student at {} ({}, {})",
            current.degree, current.institution, current.period, current.score
        );
    }
    let _ = writeln!(prompt, "- Tagline: \"{}\"", profile.tagline);

    let _ = writeln!(prompt, "\nSKILLS:");
    for category in [Category::Web, Category::Aiml] {
        let names: Vec<&str> = portfolio.skills_in(category).map(|skill| skill.name).collect();
        let _ = writeln!(prompt, "{}: {}", category.heading(), names.join(", "));
    }

    let _ = writeln!(prompt, "\nPROJECTS:");
    for (index, project) in portfolio.projects.iter().enumerate() {
        let _ = writeln!(
            prompt,
            "{}. {} ({}) - {} Technologies: {}",
            index + 1,
            project.title,
            project.period,
            project.description,
            project.technologies.join(", ")
        );
    }

    let _ = writeln!(prompt, "\nACHIEVEMENTS:");
    for achievement in portfolio.achievements {
        let _ = writeln!(prompt, "- {}: {}", achievement.title, achievement.description);
    }

    let _ = writeln!(prompt, "\nEDUCATION:");
    for entry in portfolio.education {
        let _ = writeln!(
            prompt,
            "- {} - {} ({}) - {}",
            entry.institution, entry.degree, entry.period, entry.score
        );
    }

    let _ = writeln!(prompt, "\nCONTACT:");
    for link in portfolio.social {
        let _ = writeln!(prompt, "- {}: {}", link.platform, link.url);
    }
    let _ = writeln!(prompt, "- Calendly: {}", profile.scheduling_url);

    let _ = write!(
        prompt,
        "\nIf asked about something not in this info, politely say you can only answer questions about {name}'s professional background. For hiring inquiries, direct them to book a call via Calendly or email."
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::portfolio;

    #[test]
    fn prompt_covers_every_section_of_the_portfolio() {
        let prompt = system_prompt(portfolio());

        for project in portfolio().projects {
            assert!(prompt.contains(project.title), "missing project {}", project.id);
        }
        for entry in portfolio().education {
            assert!(prompt.contains(entry.institution));
        }
        assert!(prompt.contains("Web Development: React.js"));
        assert!(prompt.contains("- Calendly: https://calendly.com/azamabdulrahman930/30min"));
        assert!(prompt.starts_with("You are Abdul Rahman Azam's AI assistant"));
    }

    #[test]
    fn first_reply_trims_and_falls_back_when_empty() {
        let parsed: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Hello there. \n"}}]}"#,
        )
        .expect("valid completion");
        assert_eq!(first_reply(parsed), "Hello there.");

        let empty: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).expect("valid");
        assert_eq!(first_reply(empty), EMPTY_REPLY);

        let blank: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"   "}}]}"#).expect("valid");
        assert_eq!(first_reply(blank), EMPTY_REPLY);
    }
}
