//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod food_repo;
mod request_repo;

pub use database::*;
pub use food_repo::*;
pub use request_repo::*;

use crate::application::ports::RepositoryError;

fn map_db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

/// 行数据无法还原为记录（JSON 列损坏、id 格式不对等）
fn corrupt_row(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::SerializationError(e.to_string())
}
