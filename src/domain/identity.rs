//! Identity - 调用方身份
//!
//! 既用于会话令牌的载荷，也作为 listing / request 上内嵌的 `Donator` 对象。
//! 除 `email` 外的其他字段（name、photo 等）原样保留。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::DomainError;

/// 身份信息（至少包含 email）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IdentityFields")]
pub struct Identity {
    email: String,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

#[derive(Deserialize)]
struct IdentityFields {
    email: String,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl TryFrom<IdentityFields> for Identity {
    type Error = DomainError;

    fn try_from(fields: IdentityFields) -> Result<Self, Self::Error> {
        Self::with_attributes(fields.email, fields.attributes)
    }
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        Self::with_attributes(email, Map::new())
    }

    pub fn with_attributes(
        email: impl Into<String>,
        attributes: Map<String, Value>,
    ) -> Result<Self, DomainError> {
        let email = email.into();
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyField { field: "email" });
        }
        if !trimmed.contains('@') {
            return Err(DomainError::InvalidEmail(email));
        }
        Ok(Self {
            email: trimmed.to_string(),
            attributes,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// 去掉指定的附加字段（例如会话令牌的保留声明）
    pub fn without_attributes(mut self, keys: &[&str]) -> Self {
        for key in keys {
            self.attributes.remove(*key);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_keeps_extra_fields() {
        let identity: Identity =
            serde_json::from_value(json!({"email": "a@x.com", "name": "Ayesha"})).unwrap();

        assert_eq!(identity.email(), "a@x.com");
        assert_eq!(identity.attributes().get("name"), Some(&json!("Ayesha")));

        let back = serde_json::to_value(&identity).unwrap();
        assert_eq!(back, json!({"email": "a@x.com", "name": "Ayesha"}));
    }

    #[test]
    fn test_identity_requires_email() {
        assert!(serde_json::from_value::<Identity>(json!({"name": "x"})).is_err());
        assert!(serde_json::from_value::<Identity>(json!({"email": "   "})).is_err());
        assert_eq!(
            Identity::new("not-an-email"),
            Err(DomainError::InvalidEmail("not-an-email".to_string()))
        );
    }

    #[test]
    fn test_without_attributes() {
        let identity: Identity =
            serde_json::from_value(json!({"email": "a@x.com", "exp": 1, "role": "donor"}))
                .unwrap();
        let identity = identity.without_attributes(&["exp", "iat"]);

        assert!(identity.attributes().get("exp").is_none());
        assert_eq!(identity.attributes().get("role"), Some(&json!("donor")));
    }
}
