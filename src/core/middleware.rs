use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::prelude::*;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::core::rate_limit::{RateDecision, RateLimiter};

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let authorized = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Basic "))
                .and_then(|encoded| BASE64_STANDARD.decode(encoded).ok())
                .and_then(|decoded| String::from_utf8(decoded).ok())
                .map(|creds| creds == *credentials)
                .unwrap_or(false);

            if authorized {
                return Ok(next.run(req).await);
            }

            Err((
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")],
                "Unauthorized",
            )
                .into_response())
        })
    }
}

/// Resolve the client address used as the rate limit key.
///
/// The socket peer address by default. The first `X-Forwarded-For` hop is used only when
/// the deployment sits behind a trusted proxy, since clients can set the header freely.
fn client_key(req: &Request, trust_proxy: bool) -> String {
    if trust_proxy {
        if let Some(forwarded) = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return forwarded.to_string();
        }
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = client_key(&req, limiter.trusts_proxy());

    match limiter.check(&client) {
        RateDecision::Allowed { .. } => Ok(next.run(req).await),
        RateDecision::Limited { retry_after } => {
            tracing::warn!(
                "Rate limit exceeded for client {} (retry in {}s)",
                client,
                retry_after.as_secs()
            );
            Err(AppError::RateLimitExceeded(
                "Too many requests, please try again later".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RateLimitConfig;
    use axum::{body::Body, routing::get, Router};
    use axum_test::TestServer;
    use std::time::Duration;
    use tower::ServiceExt;

    fn limited_app(max_requests: u32) -> Router {
        limited_app_with(max_requests, false)
    }

    fn limited_app_with(max_requests: u32, trust_proxy: bool) -> Router {
        let limiter = Arc::new(RateLimiter::new(&RateLimitConfig {
            window: Duration::from_secs(900),
            max_requests,
            trust_proxy,
        }));
        Router::new()
            .route("/api/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn_with_state(
                limiter,
                rate_limit_middleware,
            ))
    }

    fn request_from(peer: &str, forwarded_for: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/api/ping");
        if let Some(value) = forwarded_for {
            builder = builder.header("x-forwarded-for", value);
        }
        let mut req = builder.body(Body::empty()).unwrap();
        let addr: SocketAddr = peer.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        req
    }

    #[tokio::test]
    async fn test_rate_limit_returns_429_after_quota() {
        let server = TestServer::new(limited_app(2)).unwrap();

        server.get("/api/ping").await.assert_status_ok();
        server.get("/api/ping").await.assert_status_ok();

        let response = server.get("/api/ping").await;
        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            "Too many requests, please try again later"
        );
    }

    #[tokio::test]
    async fn test_forwarded_for_ignored_by_default() {
        let app = limited_app(2);

        let mut allowed = 0;
        for i in 0..50 {
            let forwarded = format!("10.9.9.{}", i);
            let response = app
                .clone()
                .oneshot(request_from("198.51.100.1:40000", Some(&forwarded)))
                .await
                .unwrap();
            if response.status() == StatusCode::OK {
                allowed += 1;
            }
        }

        assert_eq!(allowed, 2);
    }

    #[tokio::test]
    async fn test_rate_limit_keys_on_forwarded_for_behind_proxy() {
        let app = limited_app_with(1, true);
        let proxy = "10.0.0.1:443";

        let first = app
            .clone()
            .oneshot(request_from(proxy, Some("203.0.113.7")))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .clone()
            .oneshot(request_from(proxy, Some("203.0.113.8, 10.0.0.1")))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);

        let repeat = app
            .oneshot(request_from(proxy, Some("203.0.113.7")))
            .await
            .unwrap();
        assert_eq!(repeat.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_rate_limit_keys_on_peer_address() {
        let app = limited_app(1);

        let first = app
            .clone()
            .oneshot(request_from("198.51.100.1:40000", None))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        // Same host, different source port
        let second = app
            .clone()
            .oneshot(request_from("198.51.100.1:40001", None))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

        let other = app
            .oneshot(request_from("198.51.100.2:40000", None))
            .await
            .unwrap();
        assert_eq!(other.status(), StatusCode::OK);
    }
}
