//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Food Context: 食物 listing
//! - Request Context: 领取请求
//!
//! 以及两者共享的 `Identity`（会话身份 / Donator）。

pub mod food;
pub mod request;

mod errors;
mod identity;

pub use errors::DomainError;
pub use identity::Identity;
