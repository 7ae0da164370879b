//! Session Commands

use crate::domain::Identity;

/// 签发会话令牌命令
#[derive(Debug, Clone)]
pub struct IssueSession {
    pub identity: Identity,
}
