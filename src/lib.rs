//! Foodshare - 食物捐赠后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Food Context: 食物 listing、名称搜索与过期时间排序
//! - Request Context: 领取请求
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, SessionToken）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 会话 cookie
//! - Persistence: SQLite 存储
//! - Adapters: JWT 会话令牌

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
