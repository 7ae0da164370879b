//! Food Request Commands

use serde_json::{Map, Value};

use crate::domain::food::ListingId;
use crate::domain::Identity;

/// 创建领取请求命令（同时增加 listing 的 req_count）
#[derive(Debug, Clone)]
pub struct CreateFoodRequest {
    pub food_id: ListingId,
    pub donator: Identity,
    pub details: Map<String, Value>,
}
