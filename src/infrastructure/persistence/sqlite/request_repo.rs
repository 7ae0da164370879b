//! SQLite Food Request Repository

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::{corrupt_row, map_db_error, DbPool};
use crate::application::ports::{FoodRequestRecord, FoodRequestRepositoryPort, RepositoryError};
use crate::domain::food::ListingId;
use crate::domain::request::RequestId;
use crate::domain::Identity;

/// SQLite Food Request Repository
pub struct SqliteFoodRequestRepository {
    pool: DbPool,
}

impl SqliteFoodRequestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct FoodRequestRow {
    id: String,
    food_id: String,
    donator: String,
    details: String,
}

impl TryFrom<FoodRequestRow> for FoodRequestRecord {
    type Error = RepositoryError;

    fn try_from(row: FoodRequestRow) -> Result<Self, Self::Error> {
        Ok(FoodRequestRecord {
            id: RequestId::parse(&row.id).map_err(corrupt_row)?,
            food_id: ListingId::parse(&row.food_id).map_err(corrupt_row)?,
            donator: serde_json::from_str::<Identity>(&row.donator).map_err(corrupt_row)?,
            details: serde_json::from_str::<Map<String, Value>>(&row.details)
                .map_err(corrupt_row)?,
        })
    }
}

#[async_trait]
impl FoodRequestRepositoryPort for SqliteFoodRequestRepository {
    async fn insert_and_count(&self, request: &FoodRequestRecord) -> Result<(), RepositoryError> {
        let donator = serde_json::to_string(&request.donator).map_err(corrupt_row)?;
        let details = serde_json::to_string(&request.details).map_err(corrupt_row)?;

        // 使用事务确保请求与计数同时生效
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO food_requests (id, food_id, donator_email, donator, details)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.id.to_string())
        .bind(request.food_id.to_string())
        .bind(request.donator.email())
        .bind(donator)
        .bind(details)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let updated = sqlx::query("UPDATE foods SET req_count = req_count + 1 WHERE id = ?")
            .bind(request.food_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        if updated == 0 {
            // tx 在此处 drop，插入随之回滚
            return Err(RepositoryError::NotFound(format!("food {}", request.food_id)));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    async fn find_by_donator_email(
        &self,
        email: &str,
    ) -> Result<Vec<FoodRequestRecord>, RepositoryError> {
        let rows: Vec<FoodRequestRow> = sqlx::query_as(
            "SELECT id, food_id, donator, details FROM food_requests WHERE donator_email = ? ORDER BY rowid",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(FoodRequestRecord::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::FoodRepositoryPort;
    use crate::infrastructure::persistence::sqlite::food_repo::tests::{food, memory_pool};
    use crate::infrastructure::persistence::sqlite::SqliteFoodRepository;
    use serde_json::json;

    fn request_for(food_id: ListingId, email: &str) -> FoodRequestRecord {
        let mut details = Map::new();
        details.insert("requesterEmail".to_string(), json!("hungry@z.com"));
        FoodRequestRecord {
            id: RequestId::new(),
            food_id,
            donator: Identity::new(email).unwrap(),
            details,
        }
    }

    #[tokio::test]
    async fn test_insert_increments_counter() {
        let pool = memory_pool().await;
        let foods = SqliteFoodRepository::new(pool.clone());
        let requests = SqliteFoodRequestRepository::new(pool);

        let rice = food("Rice", "2025-01-01", "a@x.com");
        foods.insert(&rice).await.unwrap();

        for _ in 0..3 {
            requests
                .insert_and_count(&request_for(rice.id, "a@x.com"))
                .await
                .unwrap();
        }

        let stored = foods.find_by_id(&rice.id).await.unwrap().unwrap();
        assert_eq!(stored.req_count, 3);

        let mine = requests.find_by_donator_email("a@x.com").await.unwrap();
        assert_eq!(mine.len(), 3);
        assert_eq!(mine[0].details.get("requesterEmail"), Some(&json!("hungry@z.com")));
    }

    #[tokio::test]
    async fn test_missing_listing_rolls_back() {
        let pool = memory_pool().await;
        let requests = SqliteFoodRequestRepository::new(pool);

        let result = requests
            .insert_and_count(&request_for(ListingId::new(), "a@x.com"))
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));

        let stored = requests.find_by_donator_email("a@x.com").await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_requests_survive_listing_delete() {
        let pool = memory_pool().await;
        let foods = SqliteFoodRepository::new(pool.clone());
        let requests = SqliteFoodRequestRepository::new(pool);

        let rice = food("Rice", "2025-01-01", "a@x.com");
        foods.insert(&rice).await.unwrap();
        requests
            .insert_and_count(&request_for(rice.id, "b@y.com"))
            .await
            .unwrap();
        foods.delete(&rice.id).await.unwrap();

        let stored = requests.find_by_donator_email("b@y.com").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].food_id, rice.id);
    }
}
