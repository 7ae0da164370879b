//! JWT Session Codec - 基于 HS256 的会话令牌
//!
//! 实现 SessionTokenPort trait。令牌载荷即调用方提交的身份对象，
//! 外加 `iat` / `exp` 两个声明。

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::ports::{SessionTokenPort, TokenError};
use crate::domain::Identity;

/// 由令牌本身控制的声明，调用方提交的同名字段会被丢弃
const RESERVED_CLAIMS: &[&str] = &["exp", "iat", "nbf", "aud"];

/// 令牌声明
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(flatten)]
    identity: Identity,
    iat: i64,
    exp: i64,
}

/// JWT 会话令牌配置
#[derive(Debug, Clone)]
pub struct JwtSessionCodecConfig {
    /// 签名密钥
    pub secret: String,
    /// 有效期（天）
    pub ttl_days: i64,
}

/// JWT 会话令牌编解码器
#[derive(Clone)]
pub struct JwtSessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtSessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl JwtSessionCodec {
    pub fn new(config: &JwtSessionCodecConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: Duration::days(config.ttl_days),
        }
    }
}

impl SessionTokenPort for JwtSessionCodec {
    fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = SessionClaims {
            identity: identity.clone().without_attributes(RESERVED_CLAIMS),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;

        Ok(data.claims.identity)
    }

    fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }
}
