use super::*;
use axum::http::{Method, StatusCode};
use http_body_util::BodyExt;
use std::{collections::HashMap, net::Ipv4Addr};
use tower::ServiceExt;

fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    ServerConfig::from_lookup(|name| vars.get(name).cloned())
}

fn app_with(pairs: &[(&str, &str)]) -> Router {
    router(AppState::new(config_from(pairs)).expect("state builds"))
}

async fn send(app: Router, request: Request) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app.oneshot(request).await.expect("router answers");
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes()
        .to_vec();
    (status, headers, body)
}

fn get_request(uri: &str) -> Request {
    axum::http::Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

fn chat_request(body: &str) -> Request {
    axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

fn json(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).expect("json body")
}

async fn spawn_upstream(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("ephemeral port");
    let address = listener.local_addr().expect("bound address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{address}/v1/chat/completions")
}

const HELLO: &str = r#"{"messages":[{"role":"user","content":"What does he build?"}]}"#;

#[tokio::test]
async fn health_reports_ok_with_a_request_id() {
    let (status, headers, body) = send(app_with(&[]), get_request("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({ "ok": true }));

    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .expect("request id header");
    assert!(request_id.starts_with("req-"));
}

#[tokio::test]
async fn caller_request_id_is_echoed() {
    let request = axum::http::Request::builder()
        .uri("/api/health")
        .header(REQUEST_ID_HEADER, "trace-42")
        .body(Body::empty())
        .expect("valid request");

    let (_, headers, _) = send(app_with(&[]), request).await;
    assert_eq!(headers.get(REQUEST_ID_HEADER).expect("header"), "trace-42");
}

#[tokio::test]
async fn unknown_api_routes_are_json_not_found() {
    let (status, _, body) = send(app_with(&[]), get_request("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&body)["message"], "Not Found");
}

#[tokio::test]
async fn malformed_chat_body_is_rejected() {
    let (status, _, body) = send(app_with(&[]), chat_request("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json(&body)["message"].is_string());

    let (status, _, body) = send(app_with(&[]), chat_request(r#"{"messages":[]}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["message"], "message history is empty");
}

#[tokio::test]
async fn chat_without_an_api_key_is_unavailable() {
    let (status, _, body) = send(app_with(&[]), chat_request(HELLO)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json(&body)["message"], "assistant is not configured");
}

#[tokio::test]
async fn chat_relays_the_first_completion_choice() {
    let upstream = Router::new().route(
        "/v1/chat/completions",
        post(|Json(body): Json<serde_json::Value>| async move {
            let messages = body["messages"].as_array().cloned().unwrap_or_default();
            let first_role = messages
                .first()
                .and_then(|message| message["role"].as_str())
                .unwrap_or_default()
                .to_string();
            Json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": format!(" {first_role} then {} ", messages.len()) } }]
            }))
        }),
    );
    let api_url = spawn_upstream(upstream).await;
    let app = app_with(&[("CHAT_API_URL", &api_url), ("CHAT_API_KEY", "test-key")]);

    let (status, _, body) = send(app, chat_request(HELLO)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({ "reply": "system then 2" }));
}

#[tokio::test]
async fn upstream_failure_is_a_gateway_error() {
    let upstream = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "overloaded") }),
    );
    let api_url = spawn_upstream(upstream).await;
    let app = app_with(&[("CHAT_API_URL", &api_url), ("CHAT_API_KEY", "test-key")]);

    let (status, _, body) = send(app, chat_request(HELLO)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json(&body)["message"], "assistant request failed");
}

#[tokio::test]
async fn serves_the_bundle_with_spa_fallback() {
    let dist = tempfile::tempdir().expect("temp dir");
    std::fs::write(dist.path().join("index.html"), "<html>portfolio</html>").expect("write index");
    std::fs::write(dist.path().join("app.css"), "body{}").expect("write css");
    let static_dir = dist.path().to_string_lossy().to_string();

    let (status, _, body) = send(app_with(&[("STATIC_DIR", &static_dir)]), get_request("/app.css")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"body{}");

    let (status, _, body) = send(app_with(&[("STATIC_DIR", &static_dir)]), get_request("/projects")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<html>portfolio</html>");
}

#[tokio::test]
async fn large_assets_named_like_the_api_are_served_whole() {
    let dist = tempfile::tempdir().expect("temp dir");
    let diagram = vec![b'x'; API_LOG_BODY_MAX_BYTES + 1];
    std::fs::write(dist.path().join("index.html"), "<html>portfolio</html>").expect("write index");
    std::fs::write(dist.path().join("api-diagram.png"), &diagram).expect("write asset");
    let static_dir = dist.path().to_string_lossy().to_string();

    let (status, _, body) = send(app_with(&[("STATIC_DIR", &static_dir)]), get_request("/api-diagram.png")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.len(), diagram.len());
}

#[test]
fn only_api_routes_count_as_api_paths() {
    assert!(is_api_path("/api"));
    assert!(is_api_path("/api/chat"));
    assert!(!is_api_path("/api-diagram.png"));
    assert!(!is_api_path("/apiary"));
}

#[test]
fn api_log_line_is_capped() {
    let short = api_log_line("GET", "/api/health", 200, 3, Some(r#"{"ok":true}"#));
    assert_eq!(short, r#"GET /api/health 200 in 3ms :: {"ok":true}"#);

    let body = "x".repeat(200);
    let long = api_log_line("POST", "/api/chat", 200, 812, Some(&body));
    assert_eq!(long.chars().count(), API_LOG_LINE_MAX_CHARS);
    assert!(long.ends_with('…'));

    assert_eq!(api_log_line("POST", "/api/chat", 204, 1, None), "POST /api/chat 204 in 1ms");
}

#[test]
fn blank_or_oversized_request_ids_are_replaced() {
    let mut headers = HeaderMap::new();
    headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("   "));
    assert!(resolve_request_id(&headers).starts_with("req-"));

    headers.insert(
        REQUEST_ID_HEADER,
        HeaderValue::from_str(&"a".repeat(129)).expect("valid header"),
    );
    assert!(resolve_request_id(&headers).starts_with("req-"));
}

#[tokio::test]
async fn busy_port_moves_to_the_next_one() {
    let host = IpAddr::V4(Ipv4Addr::LOCALHOST);
    let (occupied, port) = bind_with_fallback(host, 0, 0).await.expect("ephemeral port");

    match bind_with_fallback(host, port, 0).await {
        Err(ServerError::Bind { port: failed, attempts, .. }) => {
            assert_eq!(failed, port);
            assert_eq!(attempts, 1);
        }
        other => panic!("expected a bind error, got {:?}", other.map(|(_, port)| port)),
    }

    // The neighbour may itself be taken on a busy machine; allow a few hops.
    let (_next, bound) = bind_with_fallback(host, port, 5).await.expect("falls back");
    assert!(bound > port && bound <= port.saturating_add(5));
    drop(occupied);
}
