//! SQLite Food Repository

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::{corrupt_row, map_db_error, DbPool};
use crate::application::ports::{FoodRecord, FoodRepositoryPort, RepositoryError};
use crate::domain::food::{ExpiryTime, FoodName, ListingId, ListingQuery};
use crate::domain::Identity;

const FOOD_COLUMNS: &str = "id, food_name, expired_date_time, donator, details, req_count";

/// SQLite Food Repository
pub struct SqliteFoodRepository {
    pool: DbPool,
}

impl SqliteFoodRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct FoodRow {
    id: String,
    food_name: String,
    expired_date_time: String,
    donator: String,
    details: String,
    req_count: i64,
}

impl TryFrom<FoodRow> for FoodRecord {
    type Error = RepositoryError;

    fn try_from(row: FoodRow) -> Result<Self, Self::Error> {
        Ok(FoodRecord {
            id: ListingId::parse(&row.id).map_err(corrupt_row)?,
            name: FoodName::new(row.food_name).map_err(corrupt_row)?,
            expires: ExpiryTime::parse(row.expired_date_time).map_err(corrupt_row)?,
            donator: serde_json::from_str::<Identity>(&row.donator).map_err(corrupt_row)?,
            req_count: row.req_count,
            details: serde_json::from_str::<Map<String, Value>>(&row.details)
                .map_err(corrupt_row)?,
        })
    }
}

#[async_trait]
impl FoodRepositoryPort for SqliteFoodRepository {
    async fn insert(&self, food: &FoodRecord) -> Result<(), RepositoryError> {
        let donator = serde_json::to_string(&food.donator).map_err(corrupt_row)?;
        let details = serde_json::to_string(&food.details).map_err(corrupt_row)?;

        sqlx::query(
            r#"
            INSERT INTO foods (
                id, food_name, food_name_folded, expired_date_time, expires_sort_key,
                donator_email, donator, details, req_count
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(food.id.to_string())
        .bind(food.name.as_str())
        .bind(food.name.folded())
        .bind(food.expires.as_str())
        .bind(food.expires.sort_key())
        .bind(food.donator.email())
        .bind(donator)
        .bind(details)
        .bind(food.req_count)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if duplicate {
                RepositoryError::Duplicate(format!("food {}", food.id))
            } else {
                map_db_error(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<FoodRecord>, RepositoryError> {
        let sql = format!("SELECT {FOOD_COLUMNS} FROM foods WHERE id = ?");
        let row: Option<FoodRow> = sqlx::query_as(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        row.map(FoodRecord::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<FoodRecord>, RepositoryError> {
        let sql = format!("SELECT {FOOD_COLUMNS} FROM foods ORDER BY rowid");
        let rows: Vec<FoodRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(FoodRecord::try_from).collect()
    }

    async fn find_by_donator_email(&self, email: &str) -> Result<Vec<FoodRecord>, RepositoryError> {
        let sql = format!("SELECT {FOOD_COLUMNS} FROM foods WHERE donator_email = ? ORDER BY rowid");
        let rows: Vec<FoodRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(FoodRecord::try_from).collect()
    }

    async fn search(&self, query: &ListingQuery) -> Result<Vec<FoodRecord>, RepositoryError> {
        let mut sql = format!("SELECT {FOOD_COLUMNS} FROM foods");
        if !query.name_filter.is_empty() {
            sql.push_str(" WHERE instr(food_name_folded, ?) > 0");
        }
        match query.sort {
            // rowid 作为次级排序，保证过期时间相同的记录顺序稳定
            Some(order) => {
                sql.push_str(&format!(" ORDER BY expires_sort_key {}, rowid", order.as_sql()))
            }
            None => sql.push_str(" ORDER BY rowid"),
        }

        let mut statement = sqlx::query_as::<_, FoodRow>(&sql);
        if !query.name_filter.is_empty() {
            statement = statement.bind(query.name_filter.folded_term());
        }

        let rows = statement.fetch_all(&self.pool).await.map_err(map_db_error)?;

        rows.into_iter().map(FoodRecord::try_from).collect()
    }

    async fn delete(&self, id: &ListingId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM foods WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::food::SortOrder;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};
    use serde_json::json;

    pub(crate) async fn memory_pool() -> DbPool {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    pub(crate) fn food(name: &str, expires: &str, email: &str) -> FoodRecord {
        let mut details = Map::new();
        details.insert("FoodQuantity".to_string(), json!(3));
        FoodRecord {
            id: ListingId::new(),
            name: FoodName::new(name).unwrap(),
            expires: ExpiryTime::parse(expires).unwrap(),
            donator: Identity::new(email).unwrap(),
            req_count: 0,
            details,
        }
    }

    fn names(foods: &[FoodRecord]) -> Vec<&str> {
        foods.iter().map(|f| f.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = SqliteFoodRepository::new(memory_pool().await);
        let rice = food("Rice", "2025-01-01", "a@x.com");

        repo.insert(&rice).await.unwrap();

        let found = repo.find_by_id(&rice.id).await.unwrap();
        assert_eq!(found, Some(rice.clone()));

        let missing = repo.find_by_id(&ListingId::new()).await.unwrap();
        assert!(missing.is_none());

        let dup = repo.insert(&rice).await;
        assert!(matches!(dup, Err(RepositoryError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_delete_reports_count() {
        let repo = SqliteFoodRepository::new(memory_pool().await);
        let rice = food("Rice", "2025-01-01", "a@x.com");
        repo.insert(&rice).await.unwrap();

        assert_eq!(repo.delete(&rice.id).await.unwrap(), 1);
        assert_eq!(repo.delete(&rice.id).await.unwrap(), 0);
        assert!(repo.find_by_id(&rice.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_donator_email() {
        let repo = SqliteFoodRepository::new(memory_pool().await);
        repo.insert(&food("Rice", "2025-01-01", "a@x.com")).await.unwrap();
        repo.insert(&food("Bread", "2025-01-02", "b@y.com")).await.unwrap();
        repo.insert(&food("Soup", "2025-01-03", "a@x.com")).await.unwrap();

        let mine = repo.find_by_donator_email("a@x.com").await.unwrap();
        assert_eq!(names(&mine), vec!["Rice", "Soup"]);

        let none = repo.find_by_donator_email("nobody@x.com").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_search_and_sort() {
        let repo = SqliteFoodRepository::new(memory_pool().await);
        repo.insert(&food("Fried Rice", "2025-03-01", "a@x.com")).await.unwrap();
        repo.insert(&food("Bread", "2025-01-01", "a@x.com")).await.unwrap();
        repo.insert(&food("RICE cakes", "2025-02-01T12:00", "a@x.com")).await.unwrap();

        let all = repo.search(&ListingQuery::default()).await.unwrap();
        assert_eq!(names(&all), vec!["Fried Rice", "Bread", "RICE cakes"]);

        let rice_desc = repo
            .search(&ListingQuery::from_params(Some("ric"), Some("desc")))
            .await
            .unwrap();
        assert_eq!(names(&rice_desc), vec!["Fried Rice", "RICE cakes"]);

        let asc = repo
            .search(&ListingQuery::from_params(None, Some("asc")))
            .await
            .unwrap();
        assert_eq!(names(&asc), vec!["Bread", "RICE cakes", "Fried Rice"]);
        assert_eq!(
            ListingQuery::from_params(None, Some("asc")).sort,
            Some(SortOrder::Ascending)
        );

        let none = repo
            .search(&ListingQuery::from_params(Some("pizza"), None))
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
