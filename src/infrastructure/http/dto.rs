//! Data Transfer Objects
//!
//! 字段名沿用前端约定（`FoodName`、`ExpiredDateTime`、`Donator`、`foodId`、`_id`、`req_count`）。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::{CreateFood, CreateFoodRequest, FoodRecord, FoodRequestRecord};
use crate::domain::food::{ExpiryTime, FoodName, ListingId};
use crate::domain::{DomainError, Identity};

/// 由服务端维护的字段，调用方提交的同名字段会被忽略
const SERVER_OWNED_FIELDS: &[&str] = &["_id", "req_count"];

fn strip_server_fields(mut details: Map<String, Value>) -> Map<String, Value> {
    for key in SERVER_OWNED_FIELDS {
        details.remove(*key);
    }
    details
}

// ============================================================================
// 通用响应
// ============================================================================

/// `{ "success": true }`
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// 插入确认
#[derive(Debug, Serialize)]
pub struct InsertAck {
    pub acknowledged: bool,
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
}

impl InsertAck {
    pub fn new(inserted_id: impl ToString) -> Self {
        Self {
            acknowledged: true,
            inserted_id: inserted_id.to_string(),
        }
    }
}

/// 删除确认
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub acknowledged: bool,
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

impl DeleteAck {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

// ============================================================================
// Food DTOs
// ============================================================================

/// 创建 listing 的请求体
#[derive(Debug, Deserialize)]
pub struct FoodDocument {
    #[serde(rename = "FoodName")]
    pub food_name: String,
    #[serde(rename = "ExpiredDateTime")]
    pub expired_date_time: String,
    #[serde(rename = "Donator")]
    pub donator: Identity,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl TryFrom<FoodDocument> for CreateFood {
    type Error = DomainError;

    fn try_from(doc: FoodDocument) -> Result<Self, Self::Error> {
        Ok(CreateFood {
            name: FoodName::new(doc.food_name)?,
            expires: ExpiryTime::parse(doc.expired_date_time)?,
            donator: doc.donator,
            details: strip_server_fields(doc.details),
        })
    }
}

/// listing 响应
#[derive(Debug, Serialize)]
pub struct FoodView {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "FoodName")]
    pub food_name: String,
    #[serde(rename = "ExpiredDateTime")]
    pub expired_date_time: String,
    #[serde(rename = "Donator")]
    pub donator: Identity,
    pub req_count: i64,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl From<FoodRecord> for FoodView {
    fn from(record: FoodRecord) -> Self {
        Self {
            id: record.id.to_string(),
            food_name: record.name.as_str().to_string(),
            expired_date_time: record.expires.as_str().to_string(),
            donator: record.donator,
            req_count: record.req_count,
            details: record.details,
        }
    }
}

/// `/all-foods` 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct AllFoodsParams {
    pub search: Option<String>,
    pub sort: Option<String>,
}

// ============================================================================
// Food Request DTOs
// ============================================================================

/// 创建领取请求的请求体
#[derive(Debug, Deserialize)]
pub struct FoodRequestDocument {
    #[serde(rename = "foodId")]
    pub food_id: String,
    #[serde(rename = "Donator")]
    pub donator: Identity,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl TryFrom<FoodRequestDocument> for CreateFoodRequest {
    type Error = DomainError;

    fn try_from(doc: FoodRequestDocument) -> Result<Self, Self::Error> {
        Ok(CreateFoodRequest {
            food_id: ListingId::parse(&doc.food_id)?,
            donator: doc.donator,
            details: strip_server_fields(doc.details),
        })
    }
}

/// 领取请求响应
#[derive(Debug, Serialize)]
pub struct FoodRequestView {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "foodId")]
    pub food_id: String,
    #[serde(rename = "Donator")]
    pub donator: Identity,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl From<FoodRequestRecord> for FoodRequestView {
    fn from(record: FoodRequestRecord) -> Self {
        Self {
            id: record.id.to_string(),
            food_id: record.food_id.to_string(),
            donator: record.donator,
            details: record.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_food_document_keeps_extra_fields() {
        let doc: FoodDocument = serde_json::from_value(json!({
            "FoodName": "Rice",
            "ExpiredDateTime": "2025-01-01",
            "Donator": {"email": "a@x.com", "name": "A"},
            "FoodQuantity": 4,
            "_id": "forged",
            "req_count": 99
        }))
        .unwrap();

        let command = CreateFood::try_from(doc).unwrap();
        assert_eq!(command.name.as_str(), "Rice");
        assert_eq!(command.details.get("FoodQuantity"), Some(&json!(4)));
        assert!(command.details.get("_id").is_none());
        assert!(command.details.get("req_count").is_none());
    }

    #[test]
    fn test_food_document_requires_fields() {
        let missing_donator = serde_json::from_value::<FoodDocument>(json!({
            "FoodName": "Rice",
            "ExpiredDateTime": "2025-01-01"
        }));
        assert!(missing_donator.is_err());

        let bad_expiry: FoodDocument = serde_json::from_value(json!({
            "FoodName": "Rice",
            "ExpiredDateTime": "soon",
            "Donator": {"email": "a@x.com"}
        }))
        .unwrap();
        assert!(matches!(
            CreateFood::try_from(bad_expiry),
            Err(DomainError::InvalidExpiry(_))
        ));
    }

    #[test]
    fn test_request_document_parses_food_id() {
        let id = ListingId::new();
        let doc: FoodRequestDocument = serde_json::from_value(json!({
            "foodId": id.to_string(),
            "Donator": {"email": "a@x.com"},
            "requestDate": "2025-01-01"
        }))
        .unwrap();
        let command = CreateFoodRequest::try_from(doc).unwrap();
        assert_eq!(command.food_id, id);
        assert_eq!(command.details.get("requestDate"), Some(&json!("2025-01-01")));

        let doc: FoodRequestDocument = serde_json::from_value(json!({
            "foodId": "zzz",
            "Donator": {"email": "a@x.com"}
        }))
        .unwrap();
        assert!(matches!(
            CreateFoodRequest::try_from(doc),
            Err(DomainError::InvalidId(_))
        ));
    }

    #[test]
    fn test_food_view_shape() {
        let record = FoodRecord {
            id: ListingId::new(),
            name: FoodName::new("Rice").unwrap(),
            expires: ExpiryTime::parse("2025-01-01").unwrap(),
            donator: Identity::new("a@x.com").unwrap(),
            req_count: 2,
            details: Map::new(),
        };
        let id = record.id.to_string();

        let value = serde_json::to_value(FoodView::from(record)).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": id,
                "FoodName": "Rice",
                "ExpiredDateTime": "2025-01-01",
                "Donator": {"email": "a@x.com"},
                "req_count": 2
            })
        );
    }
}
