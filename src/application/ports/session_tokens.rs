//! Session Token Port
//!
//! 签发与校验会话令牌。令牌对客户端不透明，只有服务端能判断其有效性。

use thiserror::Error;

use crate::domain::Identity;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Session Token Port
pub trait SessionTokenPort: Send + Sync {
    /// 根据身份载荷签发令牌
    fn issue(&self, identity: &Identity) -> Result<String, TokenError>;

    /// 校验签名与过期时间，返回令牌中的身份
    fn verify(&self, token: &str) -> Result<Identity, TokenError>;

    /// 令牌有效期（秒），会话 cookie 的 Max-Age 与之保持一致
    fn ttl_secs(&self) -> i64;
}
