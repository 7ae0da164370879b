//! Token Adapter - 会话令牌实现

mod jwt_session_codec;

pub use jwt_session_codec::*;
