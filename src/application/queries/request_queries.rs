//! Food Request Queries

/// 按 Donator.email 列出领取请求
#[derive(Debug, Clone)]
pub struct ListRequestsByDonator {
    pub email: String,
}
