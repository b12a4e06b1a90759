//! Development mode: hand every page/asset request to the live-reloading
//! frontend dev server instead of the built `dist/` bundle.

use super::error::{ApiError, ServerError};
use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, HeaderMap, HeaderName, Uri},
    response::Response,
};
use reqwest::redirect::Policy;
use url::Url;

const MAX_FORWARDED_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Connection-scoped headers that must not cross the proxy.
const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    header::HOST,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
];

pub struct DevProxy {
    client: reqwest::Client,
    upstream: Url,
}

impl DevProxy {
    pub fn new(upstream: Url) -> Result<Self, ServerError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()?;
        Ok(Self { client, upstream })
    }

    pub fn upstream(&self) -> &Url {
        &self.upstream
    }

    /// Joins the incoming path and query onto the dev server origin.
    pub fn target(&self, uri: &Uri) -> Result<Url, ApiError> {
        let path_and_query = uri
            .path_and_query()
            .map(|value| value.as_str())
            .unwrap_or("/");
        self.upstream
            .join(path_and_query)
            .map_err(|error| ApiError::BadRequest(format!("invalid request path: {error}")))
    }

    pub async fn forward(&self, request: Request) -> Result<Response, ApiError> {
        let (parts, body) = request.into_parts();
        let target = self.target(&parts.uri)?;
        let body = to_bytes(body, MAX_FORWARDED_BODY_BYTES)
            .await
            .map_err(|_| ApiError::BadRequest("request body too large".to_string()))?;

        let upstream = self
            .client
            .request(parts.method, target.clone())
            .headers(strip_hop_by_hop(parts.headers))
            .body(body)
            .send()
            .await
            .map_err(|error| ApiError::DevServer(format!("{target}: {error}")))?;

        let mut response = Response::builder().status(upstream.status());
        if let Some(headers) = response.headers_mut() {
            *headers = strip_hop_by_hop(upstream.headers().clone());
        }

        response
            .body(Body::from_stream(upstream.bytes_stream()))
            .map_err(|error| ApiError::Internal(error.to_string()))
    }
}

fn strip_hop_by_hop(mut headers: HeaderMap) -> HeaderMap {
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use http_body_util::BodyExt;

    fn proxy_to(url: &str) -> DevProxy {
        DevProxy::new(Url::parse(url).expect("valid URL")).expect("client builds")
    }

    #[test]
    fn target_keeps_path_and_query() {
        let proxy = proxy_to("http://127.0.0.1:8080");
        let uri: Uri = "/assets/app.js?v=3".parse().expect("valid URI");
        assert_eq!(
            proxy.target(&uri).expect("joins").as_str(),
            "http://127.0.0.1:8080/assets/app.js?v=3"
        );
    }

    #[test]
    fn strips_connection_scoped_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "localhost:8000".parse().expect("valid header"));
        headers.insert(header::CONNECTION, "keep-alive".parse().expect("valid header"));
        headers.insert(header::ACCEPT, "text/html".parse().expect("valid header"));

        let stripped = strip_hop_by_hop(headers);
        assert_eq!(stripped.len(), 1);
        assert!(stripped.contains_key(header::ACCEPT));
    }

    #[tokio::test]
    async fn forwards_to_a_running_dev_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral port");
        let address = listener.local_addr().expect("bound address");
        let upstream = Router::new().route("/", get(|| async { "<html>dev build</html>" }));
        tokio::spawn(async move {
            let _ = axum::serve(listener, upstream).await;
        });

        let proxy = proxy_to(&format!("http://{address}"));
        let request = axum::http::Request::builder()
            .uri("/")
            .body(Body::empty())
            .expect("valid request");

        let response = proxy.forward(request).await.expect("dev server answers");
        assert_eq!(response.status(), 200);
        let body = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        assert_eq!(&body[..], b"<html>dev build</html>");
    }

    #[tokio::test]
    async fn unreachable_dev_server_is_a_gateway_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("ephemeral port");
        let address = listener.local_addr().expect("bound address");
        drop(listener);

        let proxy = proxy_to(&format!("http://{address}"));
        let request = axum::http::Request::builder()
            .uri("/")
            .body(Body::empty())
            .expect("valid request");

        let error = proxy.forward(request).await.expect_err("nothing is listening");
        assert_eq!(error.status(), axum::http::StatusCode::BAD_GATEWAY);
    }
}
