//! HTTP server: the built frontend bundle, a dev-server proxy and the small JSON API.

mod assistant;
mod config;
mod dev_proxy;
mod error;

pub use assistant::{system_prompt, Assistant};
pub use config::{ChatConfig, RunMode, ServerConfig};
pub use dev_proxy::DevProxy;
pub use error::{ApiError, ServerError};

use crate::{
    chat::{ChatReply, ChatRequest},
    content::portfolio,
};
use axum::{
    body::{to_bytes, Body},
    extract::{rejection::JsonRejection, Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Extension, Json, Router,
};
use serde_json::json;
use std::{
    any::Any,
    io::ErrorKind,
    net::{IpAddr, SocketAddr},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::{net::TcpListener, time::Instant};
use tower_http::{
    catch_panic::CatchPanicLayer,
    services::{ServeDir, ServeFile},
};
use tracing_subscriber::EnvFilter;

const REQUEST_ID_HEADER: &str = "x-request-id";
const API_LOG_LINE_MAX_CHARS: usize = 80;
const API_LOG_BODY_MAX_BYTES: usize = 64 * 1024;

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    assistant: Arc<Assistant>,
    dev_proxy: Option<Arc<DevProxy>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let assistant = Assistant::new(config.chat.clone(), portfolio())?;
        let dev_proxy = match config.mode {
            RunMode::Development => Some(Arc::new(DevProxy::new(config.dev_server_url.clone())?)),
            RunMode::Production => None,
        };

        Ok(Self {
            config: Arc::new(config),
            assistant: Arc::new(assistant),
            dev_proxy,
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[derive(Clone, Debug)]
struct RequestId(String);

pub fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init();
}

pub async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::from_env();
    init_tracing(&config);

    if let Err(error) = portfolio().validate() {
        tracing::warn!(event = "content_invalid", error = %error);
    }

    let state = AppState::new(config)?;
    let config = state.config().clone();
    let app = router(state);

    let (listener, port) = bind_with_fallback(config.host, config.port, config.port_retries).await?;
    tracing::info!(
        event = "server_listening",
        port,
        mode = config.mode.as_str(),
        "serving on port {port}"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api", any(api_not_found))
        .route("/api/{*rest}", any(api_not_found));

    let app = match state.config.mode {
        RunMode::Development => api.fallback(proxy_to_dev_server),
        RunMode::Production => {
            let index = state.config.static_dir.join("index.html");
            let static_service = ServeDir::new(&state.config.static_dir).not_found_service(ServeFile::new(index));
            api.fallback_service(static_service)
        }
    };

    app.layer(middleware::from_fn(log_requests))
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

/// Binds `host:port`, moving to the next port on `AddrInUse` up to `retries` times.
pub async fn bind_with_fallback(
    host: IpAddr,
    port: u16,
    retries: u16,
) -> Result<(TcpListener, u16), ServerError> {
    let mut port = port;
    let mut retries_left = retries;

    loop {
        match TcpListener::bind(SocketAddr::new(host, port)).await {
            Ok(listener) => {
                let bound = listener.local_addr().map(|addr| addr.port()).unwrap_or(port);
                return Ok((listener, bound));
            }
            Err(error) if error.kind() == ErrorKind::AddrInUse && retries_left > 0 => {
                let Some(next_port) = port.checked_add(1) else {
                    return Err(ServerError::Bind {
                        port,
                        attempts: retries - retries_left + 1,
                        source: error,
                    });
                };
                tracing::warn!(
                    event = "port_in_use",
                    port,
                    next_port,
                    "port {port} in use, retrying on {next_port}"
                );
                port = next_port;
                retries_left -= 1;
            }
            Err(source) => {
                return Err(ServerError::Bind {
                    port,
                    attempts: retries - retries_left + 1,
                    source,
                })
            }
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound
}

async fn chat(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let history = request
        .validated_history()
        .map_err(|rejection| ApiError::BadRequest(rejection.to_string()))?;

    if !state.assistant.is_configured() {
        return Err(ApiError::AssistantUnavailable);
    }

    let reply = state.assistant.reply(history, &request_id).await?;
    Ok(Json(ChatReply { reply }))
}

async fn proxy_to_dev_server(State(state): State<AppState>, request: Request) -> Response {
    let Some(proxy) = state.dev_proxy.as_ref() else {
        return ApiError::NotFound.into_response();
    };

    match proxy.forward(request).await {
        Ok(response) => response,
        Err(error) => {
            tracing::warn!(event = "dev_proxy_failed", upstream = %proxy.upstream(), error = %error);
            error.into_response()
        }
    }
}

/// Request ids, plus one summary line per `/api` request.
async fn log_requests(mut request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let request_id = resolve_request_id(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    request.extensions_mut().insert(RequestId(request_id.clone()));

    let response = next.run(request).await;
    let mut response = if is_api_path(&path) {
        let (parts, body) = response.into_parts();
        let bytes = match to_bytes(body, API_LOG_BODY_MAX_BYTES).await {
            Ok(bytes) => bytes,
            Err(error) => {
                return ApiError::Internal(format!("failed buffering response: {error}")).into_response();
            }
        };
        let captured = std::str::from_utf8(&bytes).ok().filter(|text| !text.is_empty());
        let line = api_log_line(
            method.as_str(),
            &path,
            parts.status.as_u16(),
            started_at.elapsed().as_millis(),
            captured,
        );
        tracing::info!(
            event = "api_request_complete",
            request_id = request_id.as_str(),
            status = parts.status.as_u16(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "{line}"
        );
        Response::from_parts(parts, Body::from(bytes))
    } else {
        tracing::debug!(
            event = "request_complete",
            request_id = request_id.as_str(),
            method = method.as_str(),
            path = path.as_str(),
            status = response.status().as_u16(),
        );
        response
    };

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|value| value.to_string()))
        .unwrap_or_else(|| "handler panicked".to_string());
    ApiError::Internal(detail).into_response()
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

fn api_log_line(method: &str, path: &str, status: u16, duration_ms: u128, body: Option<&str>) -> String {
    let mut line = format!("{method} {path} {status} in {duration_ms}ms");
    if let Some(body) = body {
        line.push_str(" :: ");
        line.push_str(body);
    }

    if line.chars().count() > API_LOG_LINE_MAX_CHARS {
        let mut truncated: String = line.chars().take(API_LOG_LINE_MAX_CHARS - 1).collect();
        truncated.push('…');
        return truncated;
    }
    line
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty() && value.len() <= 128)
        .map(ToString::to_string)
        .unwrap_or_else(generate_request_id)
}

#[cfg(test)]
mod tests;
