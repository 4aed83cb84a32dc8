use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use validator::Validate;

/// Opaque, server-assigned user identifier.
///
/// The REST collection may emit ids as JSON strings or integers; both
/// are normalised to text. Empty ids are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        let id = match RawId::deserialize(deserializer)? {
            RawId::Text(text) => text,
            RawId::Unsigned(n) => n.to_string(),
            RawId::Signed(n) => n.to_string(),
        };

        if id.is_empty() {
            return Err(de::Error::custom("user id must not be empty"));
        }
        Ok(Self(id))
    }
}

/// User record as returned by the REST collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl User {
    pub fn from_fields(id: UserId, fields: UserFields) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
        }
    }

    /// Editable fields of this record (everything but the id)
    pub fn fields(&self) -> UserFields {
        UserFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Editable user fields.
///
/// This is both the body of create/update requests and the content of the
/// input form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(max = 32))]
    pub phone: String,
}

impl UserFields {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.first_name.is_empty()
            && self.last_name.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_id_accepts_string_and_number() {
        let text: UserId = serde_json::from_value(json!("5")).unwrap();
        let number: UserId = serde_json::from_value(json!(5)).unwrap();
        assert_eq!(text, number);
        assert_eq!(number.as_str(), "5");
    }

    #[test]
    fn test_user_id_rejects_empty_and_other_shapes() {
        assert!(serde_json::from_value::<UserId>(json!("")).is_err());
        assert!(serde_json::from_value::<UserId>(json!(null)).is_err());
        assert!(serde_json::from_value::<UserId>(json!({"id": 1})).is_err());
    }

    #[test]
    fn test_user_uses_camel_case_wire_names() {
        let user: User = serde_json::from_value(json!({
            "id": "1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phone": "555-0100",
            "createdAt": "ignored"
        }))
        .unwrap();

        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.fields().last_name, "Lovelace");

        let wire = serde_json::to_value(user.fields()).unwrap();
        assert_eq!(
            wire,
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "phone": "555-0100"
            })
        );
    }

    #[test]
    fn test_user_missing_field_is_rejected() {
        let result = serde_json::from_value::<User>(json!({
            "id": "1",
            "firstName": "Ada",
            "email": "ada@example.com",
            "phone": "555-0100"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_user_fields_validation() {
        let valid = UserFields::new("Ada", "Lovelace", "ada@example.com", "555-0100");
        assert!(valid.validate().is_ok());

        let bad_email = UserFields::new("Ada", "Lovelace", "not-an-email", "");
        assert!(bad_email.validate().is_err());

        let blank = UserFields::default();
        assert!(blank.is_blank());
        assert!(blank.validate().is_err());
    }
}
