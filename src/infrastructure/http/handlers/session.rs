//! Session Handlers
//!
//! 会话 cookie 的签发、清除与查看

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::application::IssueSession;
use crate::domain::Identity;
use crate::infrastructure::http::dto::SuccessResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::middleware::SessionUser;
use crate::infrastructure::http::state::AppState;

/// POST /jwt - 签发会话 cookie
pub async fn issue_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<Identity>, JsonRejection>,
) -> Result<(CookieJar, Json<SuccessResponse>), ApiError> {
    let Json(identity) = payload?;

    let issued = state
        .issue_session_handler
        .handle(IssueSession { identity })?;

    let cookie = state.session_cookie.issue(issued.token, issued.ttl_secs);
    Ok((jar.add(cookie), Json(SuccessResponse::ok())))
}

/// GET /logout - 清除会话 cookie
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    tracing::info!("Session cleared");
    (
        jar.add(state.session_cookie.clear()),
        Json(SuccessResponse::ok()),
    )
}

/// GET /me - 当前会话身份
pub async fn current_session(SessionUser(identity): SessionUser) -> Json<Identity> {
    Json(identity)
}
