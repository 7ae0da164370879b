//! Food Context - Value Objects

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// 食物 listing 唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(Uuid);

impl ListingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 解析外部传入的 id，格式不合法时返回错误而不是当作“不存在”
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| DomainError::InvalidId(raw.to_string()))
    }
}

impl Default for ListingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 食物名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodName(String);

impl FoodName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "FoodName" });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 用于大小写不敏感匹配的折叠形式
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for FoodName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// 过期时间
///
/// 保留调用方传入的原始字符串（原样返回给客户端），
/// 同时解析出可排序的时间点。带时区的输入统一换算到 UTC。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryTime {
    raw: String,
    at: NaiveDateTime,
}

impl ExpiryTime {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();

        let at = if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            dt.naive_utc()
        } else if let Some(dt) = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        {
            dt
        } else if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            date.and_time(NaiveTime::MIN)
        } else {
            return Err(DomainError::InvalidExpiry(raw));
        };

        // 排序键按四位年份定长比较
        if !(0..=9999).contains(&at.year()) {
            return Err(DomainError::InvalidExpiry(raw));
        }

        Ok(Self { raw, at })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn at(&self) -> NaiveDateTime {
        self.at
    }

    /// 定长的排序键，字典序与时间先后一致（年份限定在 0..=9999）
    pub fn sort_key(&self) -> String {
        self.at.format("%Y-%m-%dT%H:%M:%S%.9f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_id_parse() {
        let id = ListingId::new();
        assert_eq!(ListingId::parse(&id.to_string()), Ok(id));
        assert!(matches!(
            ListingId::parse("665f1c2e9b1d8a0012345678"),
            Err(DomainError::InvalidId(_))
        ));
    }

    #[test]
    fn test_food_name_rejects_blank() {
        assert!(FoodName::new("  ").is_err());
        assert_eq!(FoodName::new("Fried Rice").unwrap().folded(), "fried rice");
    }

    #[test]
    fn test_expiry_formats() {
        let date = ExpiryTime::parse("2025-01-01").unwrap();
        let local = ExpiryTime::parse("2025-01-01T08:30").unwrap();
        let rfc = ExpiryTime::parse("2025-01-01T10:00:00+02:00").unwrap();

        assert_eq!(date.as_str(), "2025-01-01");
        assert!(date.at() < local.at());
        // 10:00+02:00 == 08:00Z
        assert!(rfc.at() < local.at());
        assert!(ExpiryTime::parse("next tuesday").is_err());
    }

    #[test]
    fn test_sort_key_orders_chronologically() {
        let a = ExpiryTime::parse("2024-12-31 23:59:59.5").unwrap();
        let b = ExpiryTime::parse("2025-01-01").unwrap();
        let c = ExpiryTime::parse("2025-01-01T00:00:00.25Z").unwrap();

        assert!(a.sort_key() < b.sort_key());
        assert!(b.sort_key() < c.sort_key());
    }

    #[test]
    fn test_expiry_rejects_years_outside_four_digits() {
        for raw in ["+10000-01-01", "-0001-01-01", "+12345-06-01T00:00"] {
            assert!(
                matches!(ExpiryTime::parse(raw), Err(DomainError::InvalidExpiry(_))),
                "{raw} should be rejected"
            );
        }

        let last = ExpiryTime::parse("9999-12-31").unwrap();
        let first = ExpiryTime::parse("0000-01-01").unwrap();
        assert!(first.sort_key() < last.sort_key());
    }
}
