//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、SessionToken）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Food commands
    CreateFood,
    DeleteFood,
    // Request commands
    CreateFoodRequest,
    // Session commands
    IssueSession,
    // Handlers
    handlers::{
        CreateFoodHandler, CreateFoodRequestHandler, CreateFoodRequestResponse,
        CreateFoodResponse, DeleteFoodHandler, DeleteFoodResponse, IssueSessionHandler,
        IssuedSession,
    },
};

pub use error::ApplicationError;

pub use ports::{
    FoodRecord, FoodRepositoryPort, FoodRequestRecord, FoodRequestRepositoryPort,
    RepositoryError, SessionTokenPort, TokenError,
};

pub use queries::{
    // Food queries
    GetFood,
    ListFoods,
    ListFoodsByDonator,
    SearchFoods,
    // Request queries
    ListRequestsByDonator,
    // Handlers
    handlers::{
        GetFoodHandler, ListFoodsByDonatorHandler, ListFoodsHandler,
        ListRequestsByDonatorHandler, SearchFoodsHandler,
    },
};
