//! User record
//!
//! The single entity of the service. `email` is the lookup key for every
//! operation and is never changed after creation.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::{Result, UserError};

// == User ==
/// A stored user, as persisted in the store and mirrored into the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name (required)
    pub name: String,
    /// Unique key for all lookups (required)
    pub email: String,
    /// Optional age, any JSON number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Number>,
}

impl User {
    /// Builds a user after presence checks on the required fields.
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: Option<Number>) -> Result<Self> {
        let user = Self {
            name: name.into(),
            email: email.into(),
            age,
        };
        user.validate()?;
        Ok(user)
    }

    /// Checks that required fields are present and non-blank.
    pub fn validate(&self) -> Result<()> {
        require_non_blank("name", &self.name)?;
        require_non_blank("email", &self.email)
    }

    /// Applies a partial update. Email is untouched.
    pub fn apply(&mut self, changes: &UserChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(age) = &changes.age {
            self.age = Some(age.clone());
        }
    }

    /// Serializes the record to the JSON string stored in the cache.
    pub fn to_cache_value(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| UserError::unavailable(e.to_string()))
    }

    /// Parses a cached JSON string back into a record.
    pub fn from_cache_value(value: &str) -> serde_json::Result<Self> {
        serde_json::from_str(value)
    }
}

// == User Changes ==
/// Mutable fields of a user. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub age: Option<Number>,
}

impl UserChanges {
    /// Validates the fields that are present.
    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => require_non_blank("name", name),
            None => Ok(()),
        }
    }

    /// Returns true if nothing would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(UserError::validation(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialize_omits_missing_age() {
        let user = User::new("Ann", "ann@x.com", None).unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"name":"Ann","email":"ann@x.com"}"#);
    }

    #[test]
    fn test_user_new_rejects_blank_name() {
        let result = User::new("   ", "ann@x.com", Some(30.into()));
        assert!(matches!(result, Err(UserError::ValidationFailed(_))));
    }

    #[test]
    fn test_user_new_rejects_blank_email() {
        let result = User::new("Ann", "", Some(30.into()));
        assert!(matches!(result, Err(UserError::ValidationFailed(_))));
    }

    #[test]
    fn test_apply_keeps_email_and_unset_fields() {
        let mut user = User::new("Ann", "ann@x.com", Some(30.into())).unwrap();
        user.apply(&UserChanges {
            name: Some("Annie".to_string()),
            age: None,
        });
        assert_eq!(user.name, "Annie");
        assert_eq!(user.email, "ann@x.com");
        assert_eq!(user.age, Some(30.into()));
    }

    #[test]
    fn test_cache_value_roundtrip() {
        let user = User::new("Ann", "ann@x.com", Some(30.into())).unwrap();
        let value = user.to_cache_value().unwrap();
        assert_eq!(User::from_cache_value(&value).unwrap(), user);
    }

    #[test]
    fn test_non_integer_and_negative_age_roundtrip() {
        let json = r#"{"name":"Ann","email":"ann@x.com","age":30.5}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.age.as_ref().and_then(Number::as_f64), Some(30.5));
        assert_eq!(serde_json::to_string(&user).unwrap(), json);

        let user = User::new("Bo", "bo@x.com", Some((-1).into())).unwrap();
        let value = user.to_cache_value().unwrap();
        assert!(value.contains(r#""age":-1"#));
        assert_eq!(User::from_cache_value(&value).unwrap(), user);
    }

    #[test]
    fn test_changes_validate_blank_name() {
        let changes = UserChanges {
            name: Some("".to_string()),
            age: Some(1.into()),
        };
        assert!(changes.validate().is_err());
        assert!(UserChanges::default().validate().is_ok());
        assert!(UserChanges::default().is_empty());
    }
}
