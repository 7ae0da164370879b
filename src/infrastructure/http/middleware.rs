//! HTTP Middleware
//!
//! - 状态码错误日志
//! - 会话校验

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use super::error::ApiError;
use super::state::AppState;
use crate::application::TokenError;
use crate::domain::Identity;

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let latency_ms = elapsed_ms(started.elapsed());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            latency_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            latency_ms,
            "HTTP client error"
        );
    }

    response
}

/// 毫秒数超出 u64 时取上限
fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// 已通过校验的会话身份，由 [`require_session`] 写入请求扩展
#[derive(Debug, Clone)]
pub struct SessionUser(pub Identity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("session middleware not applied".to_string()))
    }
}

/// 会话校验中间件
///
/// 缺少 cookie 或令牌校验失败都返回同样的 401 响应，具体原因只写日志。
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(request.headers());
    let token = state
        .session_cookie
        .token_from(&jar)
        .ok_or_else(|| ApiError::Unauthorized("missing session cookie".to_string()))?;

    let identity = state.session_tokens.verify(&token).map_err(|e| match e {
        TokenError::Expired => ApiError::Unauthorized("session token expired".to_string()),
        other => ApiError::Unauthorized(other.to_string()),
    })?;

    tracing::debug!(email = %identity.email(), "Session verified");

    request.extensions_mut().insert(SessionUser(identity));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header::COOKIE, Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    use crate::application::SessionTokenPort;

    async fn ok_handler() -> &'static str {
        "OK"
    }

    async fn not_found_handler() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    async fn error_handler() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/ok", get(ok_handler))
            .route("/not-found", get(not_found_handler))
            .route("/error", get(error_handler))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    #[tokio::test]
    async fn test_logging_passes_responses_through() {
        for (uri, expected) in [
            ("/ok", StatusCode::OK),
            ("/not-found", StatusCode::NOT_FOUND),
            ("/error", StatusCode::INTERNAL_SERVER_ERROR),
        ] {
            let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
            let response = create_test_router().oneshot(request).await.unwrap();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_elapsed_ms_saturates() {
        assert_eq!(elapsed_ms(Duration::from_millis(1500)), 1500);
        assert_eq!(elapsed_ms(Duration::MAX), u64::MAX);
    }

    async fn whoami(SessionUser(identity): SessionUser) -> String {
        identity.email().to_string()
    }

    async fn session_router() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::in_memory(false).await);

        let router = Router::new()
            .route("/whoami", get(whoami))
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                require_session,
            ))
            .with_state(state.clone());
        (router, state)
    }

    fn whoami_request(cookie: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/whoami");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn read_body(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_cookie_is_unauthorized() {
        let (router, _) = session_router().await;
        let response = router.oneshot(whoami_request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            read_body(response).await,
            r#"{"message":"unauthorized access"}"#
        );
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let (router, _) = session_router().await;
        let response = router
            .oneshot(whoami_request(Some("token=not-a-jwt")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            read_body(response).await,
            r#"{"message":"unauthorized access"}"#
        );
    }

    #[tokio::test]
    async fn test_valid_token_attaches_identity() {
        let (router, state) = session_router().await;
        let token = state
            .session_tokens
            .issue(&Identity::new("a@x.com").unwrap())
            .unwrap();

        let response = router
            .oneshot(whoami_request(Some(format!("token={}", token).as_str())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_body(response).await, "a@x.com");
    }
}
