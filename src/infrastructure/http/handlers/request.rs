//! Food Request Handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::application::{CreateFoodRequest, ListRequestsByDonator};
use crate::infrastructure::http::dto::{FoodRequestDocument, FoodRequestView, InsertAck};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /req - 创建领取请求，同时增加 listing 的 req_count
pub async fn create_request(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FoodRequestDocument>, JsonRejection>,
) -> Result<Json<InsertAck>, ApiError> {
    let Json(doc) = payload?;
    let command = CreateFoodRequest::try_from(doc)?;

    let response = state.create_request_handler.handle(command).await?;
    Ok(Json(InsertAck::new(response.id)))
}

/// GET /my-req/:email - 某人提交的领取请求
pub async fn list_my_requests(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Vec<FoodRequestView>>, ApiError> {
    let requests = state
        .list_requests_by_donator_handler
        .handle(ListRequestsByDonator { email })
        .await?;
    Ok(Json(requests.into_iter().map(FoodRequestView::from).collect()))
}
