//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::food::{ExpiryTime, FoodName, ListingId, ListingQuery};
use crate::domain::request::RequestId;
use crate::domain::Identity;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Food Repository
// ============================================================================

/// 食物 listing（用于持久化）
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRecord {
    pub id: ListingId,
    pub name: FoodName,
    pub expires: ExpiryTime,
    pub donator: Identity,
    pub req_count: i64,
    /// 调用方提交的其他字段（数量、图片、取餐地点等），原样保存
    pub details: Map<String, Value>,
}

/// Food Repository Port
#[async_trait]
pub trait FoodRepositoryPort: Send + Sync {
    /// 插入新 listing
    async fn insert(&self, food: &FoodRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: &ListingId) -> Result<Option<FoodRecord>, RepositoryError>;

    /// 获取所有 listing（存储顺序）
    async fn find_all(&self) -> Result<Vec<FoodRecord>, RepositoryError>;

    /// 按 Donator.email 查找
    async fn find_by_donator_email(&self, email: &str) -> Result<Vec<FoodRecord>, RepositoryError>;

    /// 名称过滤 + 过期时间排序
    async fn search(&self, query: &ListingQuery) -> Result<Vec<FoodRecord>, RepositoryError>;

    /// 删除，返回删除的条数（0 或 1）
    async fn delete(&self, id: &ListingId) -> Result<u64, RepositoryError>;
}

// ============================================================================
// Food Request Repository
// ============================================================================

/// 领取请求（用于持久化）
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRequestRecord {
    pub id: RequestId,
    pub food_id: ListingId,
    pub donator: Identity,
    pub details: Map<String, Value>,
}

/// Food Request Repository Port
#[async_trait]
pub trait FoodRequestRepositoryPort: Send + Sync {
    /// 保存请求并把对应 listing 的 req_count 加一
    ///
    /// 两次写入在同一事务内完成；listing 不存在时返回 `NotFound` 且不写入任何数据。
    async fn insert_and_count(&self, request: &FoodRequestRecord) -> Result<(), RepositoryError>;

    /// 按 Donator.email 查找
    async fn find_by_donator_email(
        &self,
        email: &str,
    ) -> Result<Vec<FoodRequestRecord>, RepositoryError>;
}
