//! Food Request Command Handlers

use std::sync::Arc;

use crate::application::commands::CreateFoodRequest;
use crate::application::error::ApplicationError;
use crate::application::ports::{FoodRequestRecord, FoodRequestRepositoryPort, RepositoryError};
use crate::domain::request::RequestId;

/// 创建请求响应
#[derive(Debug, Clone)]
pub struct CreateFoodRequestResponse {
    pub id: RequestId,
}

/// CreateFoodRequest Handler
///
/// 请求写入与 req_count 自增是一个原子单元，引用的 listing 不存在时整体失败。
pub struct CreateFoodRequestHandler {
    request_repo: Arc<dyn FoodRequestRepositoryPort>,
}

impl CreateFoodRequestHandler {
    pub fn new(request_repo: Arc<dyn FoodRequestRepositoryPort>) -> Self {
        Self { request_repo }
    }

    pub async fn handle(
        &self,
        command: CreateFoodRequest,
    ) -> Result<CreateFoodRequestResponse, ApplicationError> {
        let request = FoodRequestRecord {
            id: RequestId::new(),
            food_id: command.food_id,
            donator: command.donator,
            details: command.details,
        };

        match self.request_repo.insert_and_count(&request).await {
            Ok(()) => {}
            Err(RepositoryError::NotFound(_)) => {
                return Err(ApplicationError::not_found("Food", request.food_id));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            request_id = %request.id,
            food_id = %request.food_id,
            donator = %request.donator.email(),
            "Food request created"
        );

        Ok(CreateFoodRequestResponse { id: request.id })
    }
}
