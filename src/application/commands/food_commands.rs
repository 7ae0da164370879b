//! Food Commands

use serde_json::{Map, Value};

use crate::domain::food::{ExpiryTime, FoodName, ListingId};
use crate::domain::Identity;

/// 创建 listing 命令
#[derive(Debug, Clone)]
pub struct CreateFood {
    pub name: FoodName,
    pub expires: ExpiryTime,
    pub donator: Identity,
    pub details: Map<String, Value>,
}

/// 删除 listing 命令
#[derive(Debug, Clone)]
pub struct DeleteFood {
    pub food_id: ListingId,
}
