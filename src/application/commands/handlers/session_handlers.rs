//! Session Command Handlers

use std::sync::Arc;

use crate::application::commands::IssueSession;
use crate::application::error::ApplicationError;
use crate::application::ports::SessionTokenPort;

/// 签发结果
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub ttl_secs: i64,
}

/// IssueSession Handler
pub struct IssueSessionHandler {
    session_tokens: Arc<dyn SessionTokenPort>,
}

impl IssueSessionHandler {
    pub fn new(session_tokens: Arc<dyn SessionTokenPort>) -> Self {
        Self { session_tokens }
    }

    pub fn handle(&self, command: IssueSession) -> Result<IssuedSession, ApplicationError> {
        let token = self.session_tokens.issue(&command.identity)?;

        tracing::info!(email = %command.identity.email(), "Session issued");

        Ok(IssuedSession {
            token,
            ttl_secs: self.session_tokens.ttl_secs(),
        })
    }
}
