//! Request DTOs for the user API
//!
//! Defines the structure of incoming HTTP request bodies. Fields are
//! optional on the wire so missing values surface as validation errors.

use serde::Deserialize;
use serde_json::Number;

use crate::error::{Result, UserError};
use crate::models::{User, UserChanges};

/// Request body for POST /users
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<Number>,
}

impl CreateUserRequest {
    /// Converts the request into a validated `User`.
    pub fn into_user(self) -> Result<User> {
        let name = self
            .name
            .ok_or_else(|| UserError::validation("name is required"))?;
        let email = self
            .email
            .ok_or_else(|| UserError::validation("email is required"))?;
        User::new(name, email, self.age)
    }
}

/// Request body for PUT /users/:email
///
/// Any `email` sent in the body is ignored; the path decides the target.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<Number>,
}

impl UpdateUserRequest {
    /// Converts the request into validated changes.
    pub fn into_changes(self) -> Result<UserChanges> {
        let changes = UserChanges {
            name: self.name,
            age: self.age,
        };
        changes.validate()?;
        Ok(changes)
    }
}
