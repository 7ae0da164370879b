//! Food Queries

use crate::domain::food::{ListingId, ListingQuery};

/// 获取单个 listing
#[derive(Debug, Clone)]
pub struct GetFood {
    pub food_id: ListingId,
}

/// 列出所有 listing
#[derive(Debug, Clone)]
pub struct ListFoods;

/// 按 Donator.email 列出 listing
#[derive(Debug, Clone)]
pub struct ListFoodsByDonator {
    pub email: String,
}

/// 名称搜索 + 过期时间排序
#[derive(Debug, Clone)]
pub struct SearchFoods {
    pub query: ListingQuery,
}
