//! MongoDB user store
//!
//! Stores users in a `users` collection with a unique index on `email`.

use async_trait::async_trait;
use mongodb::{
    bson::{doc, Bson, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
    Client, Collection, IndexModel,
};
use serde_json::Number;
use tracing::info;

use super::UserStore;
use crate::error::{Result, UserError};
use crate::models::{User, UserChanges};

/// Collection holding user documents
const COLLECTION: &str = "users";

/// Server error code for a unique index violation
const DUPLICATE_KEY: i32 = 11000;

// == Mongo User Store ==
/// User store backed by a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoUserStore {
    users: Collection<User>,
}

impl MongoUserStore {
    /// Connects to MongoDB and ensures the unique email index exists.
    ///
    /// # Arguments
    /// * `uri` - MongoDB connection string
    /// * `database` - Database name
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await.map_err(unavailable)?;
        let users = client.database(database).collection::<User>(COLLECTION);

        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        users.create_index(index).await.map_err(unavailable)?;

        info!("Connected to MongoDB database '{}'", database);
        Ok(Self { users })
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn create(&self, user: &User) -> Result<User> {
        user.validate()?;

        self.users.insert_one(user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                UserError::validation(format!("email '{}' already exists", user.email))
            } else {
                unavailable(e)
            }
        })?;
        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users
            .find_one(doc! { "email": email })
            .await
            .map_err(unavailable)
    }

    async fn update_by_email(&self, email: &str, changes: &UserChanges) -> Result<Option<User>> {
        changes.validate()?;
        if changes.is_empty() {
            return self.find_by_email(email).await;
        }

        self.users
            .find_one_and_update(doc! { "email": email }, doc! { "$set": set_document(changes) })
            .return_document(ReturnDocument::After)
            .await
            .map_err(unavailable)
    }

    async fn delete_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users
            .find_one_and_delete(doc! { "email": email })
            .await
            .map_err(unavailable)
    }
}

/// Builds the `$set` body for the fields that are present.
fn set_document(changes: &UserChanges) -> Document {
    let mut set = Document::new();
    if let Some(name) = &changes.name {
        set.insert("name", name.as_str());
    }
    if let Some(age) = &changes.age {
        set.insert("age", number_to_bson(age));
    }
    set
}

/// Integers that fit are stored as `Int64`, everything else as `Double`.
fn number_to_bson(number: &Number) -> Bson {
    match number.as_i64() {
        Some(n) => Bson::Int64(n),
        None => Bson::Double(number.as_f64().unwrap_or(f64::NAN)),
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

fn unavailable(err: MongoError) -> UserError {
    UserError::unavailable(format!("mongodb: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_document_only_present_fields() {
        let changes = UserChanges {
            name: Some("Annie".to_string()),
            age: None,
        };
        let set = set_document(&changes);
        assert_eq!(set.get_str("name").unwrap(), "Annie");
        assert!(!set.contains_key("age"));
        assert!(!set.contains_key("email"));
    }

    #[test]
    fn test_set_document_age() {
        let changes = UserChanges {
            name: None,
            age: Some(31.into()),
        };
        assert_eq!(set_document(&changes).get_i64("age").unwrap(), 31);
    }

    #[test]
    fn test_set_document_fractional_age() {
        let changes = UserChanges {
            name: None,
            age: Number::from_f64(30.5),
        };
        assert_eq!(set_document(&changes).get_f64("age").unwrap(), 30.5);
    }
}
