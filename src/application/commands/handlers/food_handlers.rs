//! Food Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateFood, DeleteFood};
use crate::application::error::ApplicationError;
use crate::application::ports::{FoodRecord, FoodRepositoryPort};
use crate::domain::food::ListingId;

// ============================================================================
// CreateFood
// ============================================================================

/// 创建 listing 响应
#[derive(Debug, Clone)]
pub struct CreateFoodResponse {
    pub id: ListingId,
}

/// CreateFood Handler
pub struct CreateFoodHandler {
    food_repo: Arc<dyn FoodRepositoryPort>,
}

impl CreateFoodHandler {
    pub fn new(food_repo: Arc<dyn FoodRepositoryPort>) -> Self {
        Self { food_repo }
    }

    pub async fn handle(&self, command: CreateFood) -> Result<CreateFoodResponse, ApplicationError> {
        let food = FoodRecord {
            id: ListingId::new(),
            name: command.name,
            expires: command.expires,
            donator: command.donator,
            req_count: 0,
            details: command.details,
        };

        self.food_repo.insert(&food).await?;

        tracing::info!(
            food_id = %food.id,
            name = %food.name,
            donator = %food.donator.email(),
            "Food listing created"
        );

        Ok(CreateFoodResponse { id: food.id })
    }
}

// ============================================================================
// DeleteFood
// ============================================================================

/// 删除 listing 响应
#[derive(Debug, Clone)]
pub struct DeleteFoodResponse {
    pub deleted_count: u64,
}

/// DeleteFood Handler
///
/// 删除不存在的 listing 不是错误，`deleted_count` 为 0。
pub struct DeleteFoodHandler {
    food_repo: Arc<dyn FoodRepositoryPort>,
}

impl DeleteFoodHandler {
    pub fn new(food_repo: Arc<dyn FoodRepositoryPort>) -> Self {
        Self { food_repo }
    }

    pub async fn handle(&self, command: DeleteFood) -> Result<DeleteFoodResponse, ApplicationError> {
        let deleted_count = self.food_repo.delete(&command.food_id).await?;

        tracing::info!(
            food_id = %command.food_id,
            deleted_count,
            "Food listing deleted"
        );

        Ok(DeleteFoodResponse { deleted_count })
    }
}
