//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateFoodHandler, CreateFoodRequestHandler, DeleteFoodHandler, IssueSessionHandler,
    // Query handlers
    GetFoodHandler, ListFoodsByDonatorHandler, ListFoodsHandler, ListRequestsByDonatorHandler,
    SearchFoodsHandler,
    // Ports
    FoodRepositoryPort, FoodRequestRepositoryPort, SessionTokenPort,
};

use super::session_cookie::SessionCookie;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub session_tokens: Arc<dyn SessionTokenPort>,

    // ========== Session ==========
    pub session_cookie: SessionCookie,
    /// 写接口是否需要会话
    pub protect_writes: bool,

    // ========== Command Handlers ==========
    pub issue_session_handler: IssueSessionHandler,
    pub create_food_handler: CreateFoodHandler,
    pub delete_food_handler: DeleteFoodHandler,
    pub create_request_handler: CreateFoodRequestHandler,

    // ========== Query Handlers ==========
    pub get_food_handler: GetFoodHandler,
    pub list_foods_handler: ListFoodsHandler,
    pub list_foods_by_donator_handler: ListFoodsByDonatorHandler,
    pub search_foods_handler: SearchFoodsHandler,
    pub list_requests_by_donator_handler: ListRequestsByDonatorHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        food_repo: Arc<dyn FoodRepositoryPort>,
        request_repo: Arc<dyn FoodRequestRepositoryPort>,
        session_tokens: Arc<dyn SessionTokenPort>,
        session_cookie: SessionCookie,
        protect_writes: bool,
    ) -> Self {
        Self {
            session_tokens: session_tokens.clone(),
            session_cookie,
            protect_writes,

            // Command handlers
            issue_session_handler: IssueSessionHandler::new(session_tokens),
            create_food_handler: CreateFoodHandler::new(food_repo.clone()),
            delete_food_handler: DeleteFoodHandler::new(food_repo.clone()),
            create_request_handler: CreateFoodRequestHandler::new(request_repo.clone()),

            // Query handlers
            get_food_handler: GetFoodHandler::new(food_repo.clone()),
            list_foods_handler: ListFoodsHandler::new(food_repo.clone()),
            list_foods_by_donator_handler: ListFoodsByDonatorHandler::new(food_repo.clone()),
            search_foods_handler: SearchFoodsHandler::new(food_repo),
            list_requests_by_donator_handler: ListRequestsByDonatorHandler::new(request_repo),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// 使用给定仓储的测试状态（开发环境 cookie，365 天令牌）
    pub(crate) fn with_repositories(
        food_repo: Arc<dyn FoodRepositoryPort>,
        request_repo: Arc<dyn FoodRequestRepositoryPort>,
        protect_writes: bool,
    ) -> Self {
        use crate::config::DeployEnvironment;
        use crate::infrastructure::adapters::{JwtSessionCodec, JwtSessionCodecConfig};

        let codec = JwtSessionCodec::new(&JwtSessionCodecConfig {
            secret: "test-secret".to_string(),
            ttl_days: 365,
        });

        Self::new(
            food_repo,
            request_repo,
            Arc::new(codec),
            SessionCookie::new("token", DeployEnvironment::Development),
            protect_writes,
        )
    }

    /// 基于 SQLite 连接池的测试状态
    pub(crate) async fn with_database(
        config: &crate::infrastructure::persistence::sqlite::DatabaseConfig,
        protect_writes: bool,
    ) -> Self {
        use crate::infrastructure::persistence::sqlite::{
            create_pool, run_migrations, SqliteFoodRepository, SqliteFoodRequestRepository,
        };

        let pool = create_pool(config).await.unwrap();
        run_migrations(&pool).await.unwrap();

        Self::with_repositories(
            Arc::new(SqliteFoodRepository::new(pool.clone())),
            Arc::new(SqliteFoodRequestRepository::new(pool)),
            protect_writes,
        )
    }

    /// 基于内存 SQLite 的测试状态
    pub(crate) async fn in_memory(protect_writes: bool) -> Self {
        use crate::infrastructure::persistence::sqlite::DatabaseConfig;

        Self::with_database(&DatabaseConfig::in_memory(), protect_writes).await
    }
}
