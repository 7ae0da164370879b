//! Domain Errors

use thiserror::Error;

/// 领域校验错误（在边界处拒绝不合法的输入）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("invalid email: {0}")]
    InvalidEmail(String),

    #[error("invalid expiry time: {0}")]
    InvalidExpiry(String),
}
