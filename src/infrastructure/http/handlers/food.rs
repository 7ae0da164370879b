//! Food Listing Handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    CreateFood, DeleteFood, GetFood, ListFoods, ListFoodsByDonator, SearchFoods,
};
use crate::domain::food::{ListingId, ListingQuery};
use crate::infrastructure::http::dto::{
    AllFoodsParams, DeleteAck, FoodDocument, FoodView, InsertAck,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

const FETCH_FOODS_FAILED: &str = "Error fetching foods";

fn to_views<T: Into<FoodView>>(records: Vec<T>) -> Vec<FoodView> {
    records.into_iter().map(Into::into).collect()
}

/// GET /foods - 全部 listing（插入顺序）
pub async fn list_foods(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FoodView>>, ApiError> {
    let foods = state.list_foods_handler.handle(ListFoods).await?;
    Ok(Json(to_views(foods)))
}

/// GET /food/:id - 单个 listing，不存在时返回 `null`
pub async fn get_food(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<FoodView>>, ApiError> {
    let food_id = ListingId::parse(&id)?;
    let food = state.get_food_handler.handle(GetFood { food_id }).await?;
    Ok(Json(food.map(FoodView::from)))
}

/// POST /food - 创建 listing
pub async fn create_food(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FoodDocument>, JsonRejection>,
) -> Result<Json<InsertAck>, ApiError> {
    let Json(doc) = payload?;
    let command = CreateFood::try_from(doc)?;

    let response = state.create_food_handler.handle(command).await?;
    Ok(Json(InsertAck::new(response.id)))
}

/// DELETE /food/:id - 删除 listing
pub async fn delete_food(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    let food_id = ListingId::parse(&id)?;
    let response = state.delete_food_handler.handle(DeleteFood { food_id }).await?;
    Ok(Json(DeleteAck::new(response.deleted_count)))
}

/// GET /my-foods/:email - 某个捐赠者的 listing
///
/// 存储出错时返回纯文本 500，与其余接口的 JSON 错误体不同。
pub async fn list_my_foods(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Response {
    match state
        .list_foods_by_donator_handler
        .handle(ListFoodsByDonator { email })
        .await
    {
        Ok(foods) => Json(to_views(foods)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch foods by donator");
            (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FOODS_FAILED).into_response()
        }
    }
}

/// GET /all-foods?search=&sort= - 名称搜索 + 过期时间排序
pub async fn search_foods(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AllFoodsParams>,
) -> Result<Json<Vec<FoodView>>, ApiError> {
    let query = ListingQuery::from_params(params.search.as_deref(), params.sort.as_deref());
    let foods = state.search_foods_handler.handle(SearchFoods { query }).await?;
    Ok(Json(to_views(foods)))
}
