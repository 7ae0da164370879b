//! HTTP Routes
//!
//! API Endpoints:
//! - /                  GET     存活检查
//! - /jwt               POST    签发会话 cookie
//! - /logout            GET     清除会话 cookie
//! - /me                GET     当前会话身份（需要会话）
//! - /foods             GET     全部 listing
//! - /food              POST    创建 listing
//! - /food/:id          GET     单个 listing
//! - /food/:id          DELETE  删除 listing
//! - /my-foods/:email   GET     某捐赠者的 listing
//! - /all-foods         GET     名称搜索 + 过期时间排序
//! - /req               POST    创建领取请求
//! - /my-req/:email     GET     某人的领取请求
//!
//! `protect_writes` 打开时，POST /food、DELETE /food/:id、POST /req 也需要会话。

use axum::{
    middleware,
    routing::{delete, get, post, MethodRouter},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::middleware::require_session;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::health))
        .merge(session_routes(state))
        .merge(food_routes(state))
        .merge(request_routes(state))
}

/// 需要会话的路由
fn guarded(route: MethodRouter<Arc<AppState>>, state: &Arc<AppState>) -> MethodRouter<Arc<AppState>> {
    route.route_layer(middleware::from_fn_with_state(state.clone(), require_session))
}

/// 写接口，按配置决定是否需要会话
fn write_route(
    route: MethodRouter<Arc<AppState>>,
    state: &Arc<AppState>,
) -> MethodRouter<Arc<AppState>> {
    if state.protect_writes {
        guarded(route, state)
    } else {
        route
    }
}

/// Session 路由
fn session_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/jwt", post(handlers::issue_session))
        .route("/logout", get(handlers::logout))
        .route("/me", guarded(get(handlers::current_session), state))
}

/// Food 路由
fn food_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/foods", get(handlers::list_foods))
        .route("/food", write_route(post(handlers::create_food), state))
        .route(
            "/food/:id",
            get(handlers::get_food).merge(write_route(delete(handlers::delete_food), state)),
        )
        .route("/my-foods/:email", get(handlers::list_my_foods))
        .route("/all-foods", get(handlers::search_foods))
}

/// Request 路由
fn request_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/req", write_route(post(handlers::create_request), state))
        .route("/my-req/:email", get(handlers::list_my_requests))
}
