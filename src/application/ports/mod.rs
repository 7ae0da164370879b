//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod repositories;
mod session_tokens;

pub use repositories::{
    FoodRecord, FoodRepositoryPort, FoodRequestRecord, FoodRequestRepositoryPort, RepositoryError,
};
pub use session_tokens::{SessionTokenPort, TokenError};
