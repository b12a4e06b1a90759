use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::io;
use thiserror::Error;

/// Every failure a handler can surface. Rendered as `{ "message": ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Not Found")]
    NotFound,
    #[error("assistant is not configured")]
    AssistantUnavailable,
    #[error("assistant upstream failed: {0}")]
    Upstream(&'static str),
    #[error("dev server unreachable: {0}")]
    DevServer(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AssistantUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream(_) | Self::DevServer(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Upstream details stay in the log; clients get a generic line.
    pub fn public_message(&self) -> String {
        match self {
            Self::Upstream(_) => "assistant request failed".to_string(),
            Self::DevServer(_) => "dev server unavailable".to_string(),
            Self::Internal(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(event = "request_failed", status = status.as_u16(), error = %self);
        } else {
            tracing::info!(event = "request_rejected", status = status.as_u16(), error = %self);
        }

        let message = self.public_message();
        (status, Json(ErrorBody { message: &message })).into_response()
    }
}

/// Startup failures; these end the process.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("could not bind port {port} after {attempts} attempt(s): {source}")]
    Bind {
        port: u16,
        attempts: u16,
        #[source]
        source: io::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn client_errors_echo_their_message() {
        let (status, body) = body_json(ApiError::BadRequest("message is too long".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "message": "message is too long" }));
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let (status, body) = body_json(ApiError::Upstream("received non-success response")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["message"], "assistant request failed");

        let (status, body) = body_json(ApiError::Internal("boom".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal Server Error");
    }
}
