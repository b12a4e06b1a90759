use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
    time::Duration,
};
use url::Url;

pub const DEFAULT_PORT: u16 = 8000;
const DEFAULT_PORT_RETRIES: u16 = 10;
const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_STATIC_DIR: &str = "dist";
const DEFAULT_DEV_SERVER_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_CHAT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_CHAT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_CHAT_TEMPERATURE: f32 = 0.7;
const DEFAULT_CHAT_MAX_TOKENS: u32 = 300;
const DEFAULT_CHAT_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_CHAT_RESPONSE_MAX_BYTES: usize = 256 * 1024;
const DEFAULT_LOG_LEVEL: &str = "info";

const PORT_RETRIES_BOUNDS: (u16, u16) = (0, 100);
const CHAT_MAX_TOKENS_BOUNDS: (u32, u32) = (16, 4_096);
const CHAT_TIMEOUT_MS_BOUNDS: (u64, u64) = (500, 120_000);
const CHAT_RESPONSE_MAX_BYTES_BOUNDS: (usize, usize) = (1_024, 4 * 1024 * 1024);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub api_url: Url,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub response_max_bytes: usize,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub port_retries: u16,
    pub mode: RunMode,
    pub static_dir: PathBuf,
    pub dev_server_url: Url,
    pub chat: ChatConfig,
    pub log_level: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ServerConfig::from_env`] over an arbitrary variable source.
    /// Unparsable or out-of-range values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_number(&lookup, "PORT", DEFAULT_PORT, (1, u16::MAX));
        let port_retries = parse_number(
            &lookup,
            "PORT_RETRIES",
            DEFAULT_PORT_RETRIES,
            PORT_RETRIES_BOUNDS,
        );
        let host = non_empty(&lookup, "HOST")
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(DEFAULT_BIND_HOST);
        let mode = parse_run_mode(&lookup);
        let static_dir = non_empty(&lookup, "STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));
        let dev_server_url = parse_http_url(&lookup, "DEV_SERVER_URL", DEFAULT_DEV_SERVER_URL);
        let log_level = non_empty(&lookup, "LOG_LEVEL")
            .map(|value| value.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let chat = ChatConfig {
            api_url: parse_http_url(&lookup, "CHAT_API_URL", DEFAULT_CHAT_API_URL),
            api_key: non_empty(&lookup, "CHAT_API_KEY"),
            model: non_empty(&lookup, "CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            temperature: non_empty(&lookup, "CHAT_TEMPERATURE")
                .and_then(|value| value.parse::<f32>().ok())
                .filter(|value| (0.0..=2.0).contains(value))
                .unwrap_or(DEFAULT_CHAT_TEMPERATURE),
            max_tokens: parse_number(
                &lookup,
                "CHAT_MAX_TOKENS",
                DEFAULT_CHAT_MAX_TOKENS,
                CHAT_MAX_TOKENS_BOUNDS,
            ),
            timeout: Duration::from_millis(parse_number(
                &lookup,
                "CHAT_TIMEOUT_MS",
                DEFAULT_CHAT_TIMEOUT_MS,
                CHAT_TIMEOUT_MS_BOUNDS,
            )),
            response_max_bytes: parse_number(
                &lookup,
                "CHAT_RESPONSE_MAX_BYTES",
                DEFAULT_CHAT_RESPONSE_MAX_BYTES,
                CHAT_RESPONSE_MAX_BYTES_BOUNDS,
            ),
        };

        Self {
            host,
            port,
            port_retries,
            mode,
            static_dir,
            dev_server_url,
            chat,
            log_level,
        }
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_number<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
    bounds: (T, T),
) -> T
where
    T: std::str::FromStr + PartialOrd + Copy,
{
    non_empty(lookup, name)
        .and_then(|value| value.parse::<T>().ok())
        .filter(|value| *value >= bounds.0 && *value <= bounds.1)
        .unwrap_or(default)
}

fn parse_http_url(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: &str) -> Url {
    non_empty(lookup, name)
        .and_then(|value| Url::parse(&value).ok())
        .filter(|url| url.scheme() == "http" || url.scheme() == "https")
        .unwrap_or_else(|| Url::parse(default).expect("default URL constants are valid"))
}

fn parse_run_mode(lookup: &impl Fn(&str) -> Option<String>) -> RunMode {
    let is_development = ["APP_ENV", "RUST_ENV"].iter().any(|name| {
        non_empty(lookup, name).is_some_and(|value| value.eq_ignore_ascii_case("development"))
    });

    if is_development {
        RunMode::Development
    } else {
        RunMode::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.port_retries, 10);
        assert_eq!(config.mode, RunMode::Production);
        assert_eq!(config.static_dir, PathBuf::from("dist"));
        assert_eq!(config.chat.api_key, None);
        assert_eq!(config.chat.model, "llama-3.1-8b-instant");
        assert_eq!(config.chat.max_tokens, 300);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.dev_server_url.as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn reads_port_and_mode() {
        let config = config_from(&[("PORT", " 9100 "), ("APP_ENV", "Development")]);
        assert_eq!(config.port, 9100);
        assert_eq!(config.mode, RunMode::Development);

        let legacy = config_from(&[("RUST_ENV", "development")]);
        assert_eq!(legacy.mode, RunMode::Development);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("CHAT_TIMEOUT_MS", "5"),
            ("CHAT_TEMPERATURE", "9"),
            ("DEV_SERVER_URL", "ftp://example.com"),
            ("HOST", "localhost"),
            ("CHAT_API_KEY", "   "),
        ]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.chat.timeout, Duration::from_millis(DEFAULT_CHAT_TIMEOUT_MS));
        assert_eq!(config.chat.temperature, DEFAULT_CHAT_TEMPERATURE);
        assert_eq!(config.dev_server_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(config.host, DEFAULT_BIND_HOST);
        assert_eq!(config.chat.api_key, None);
    }

    #[test]
    fn reads_chat_settings() {
        let config = config_from(&[
            ("CHAT_API_URL", "http://127.0.0.1:9999/v1/chat/completions"),
            ("CHAT_API_KEY", "secret"),
            ("CHAT_MAX_TOKENS", "512"),
        ]);
        assert_eq!(config.chat.api_url.port(), Some(9999));
        assert_eq!(config.chat.api_key.as_deref(), Some("secret"));
        assert_eq!(config.chat.max_tokens, 512);
    }
}
