//! Health Handler

/// 存活检查
pub async fn health() -> &'static str {
    "Food share server is running"
}
