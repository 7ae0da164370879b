//! Food Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{FoodRecord, FoodRepositoryPort};
use crate::application::queries::{GetFood, ListFoods, ListFoodsByDonator, SearchFoods};

/// GetFood Handler
///
/// listing 不存在时返回 `None`，由调用方决定如何呈现。
pub struct GetFoodHandler {
    food_repo: Arc<dyn FoodRepositoryPort>,
}

impl GetFoodHandler {
    pub fn new(food_repo: Arc<dyn FoodRepositoryPort>) -> Self {
        Self { food_repo }
    }

    pub async fn handle(&self, query: GetFood) -> Result<Option<FoodRecord>, ApplicationError> {
        Ok(self.food_repo.find_by_id(&query.food_id).await?)
    }
}

/// ListFoods Handler
pub struct ListFoodsHandler {
    food_repo: Arc<dyn FoodRepositoryPort>,
}

impl ListFoodsHandler {
    pub fn new(food_repo: Arc<dyn FoodRepositoryPort>) -> Self {
        Self { food_repo }
    }

    pub async fn handle(&self, _query: ListFoods) -> Result<Vec<FoodRecord>, ApplicationError> {
        Ok(self.food_repo.find_all().await?)
    }
}

/// ListFoodsByDonator Handler
pub struct ListFoodsByDonatorHandler {
    food_repo: Arc<dyn FoodRepositoryPort>,
}

impl ListFoodsByDonatorHandler {
    pub fn new(food_repo: Arc<dyn FoodRepositoryPort>) -> Self {
        Self { food_repo }
    }

    pub async fn handle(
        &self,
        query: ListFoodsByDonator,
    ) -> Result<Vec<FoodRecord>, ApplicationError> {
        Ok(self.food_repo.find_by_donator_email(&query.email).await?)
    }
}

/// SearchFoods Handler
pub struct SearchFoodsHandler {
    food_repo: Arc<dyn FoodRepositoryPort>,
}

impl SearchFoodsHandler {
    pub fn new(food_repo: Arc<dyn FoodRepositoryPort>) -> Self {
        Self { food_repo }
    }

    pub async fn handle(&self, query: SearchFoods) -> Result<Vec<FoodRecord>, ApplicationError> {
        let foods = self.food_repo.search(&query.query).await?;

        tracing::debug!(
            search = %query.query.name_filter.folded_term(),
            sort = ?query.query.sort,
            results = foods.len(),
            "Foods searched"
        );

        Ok(foods)
    }
}
