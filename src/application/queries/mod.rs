//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod food_queries;
mod request_queries;

pub mod handlers;

pub use food_queries::*;
pub use request_queries::*;
