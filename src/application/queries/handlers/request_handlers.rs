//! Food Request Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{FoodRequestRecord, FoodRequestRepositoryPort};
use crate::application::queries::ListRequestsByDonator;

/// ListRequestsByDonator Handler
pub struct ListRequestsByDonatorHandler {
    request_repo: Arc<dyn FoodRequestRepositoryPort>,
}

impl ListRequestsByDonatorHandler {
    pub fn new(request_repo: Arc<dyn FoodRequestRepositoryPort>) -> Self {
        Self { request_repo }
    }

    pub async fn handle(
        &self,
        query: ListRequestsByDonator,
    ) -> Result<Vec<FoodRequestRecord>, ApplicationError> {
        Ok(self.request_repo.find_by_donator_email(&query.email).await?)
    }
}
