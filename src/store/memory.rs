//! In-memory user store
//!
//! HashMap keyed by email behind a tokio `RwLock`. Used when no MongoDB
//! connection string is configured, and throughout the tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UserStore;
use crate::error::{Result, UserError};
use crate::models::{User, UserChanges};

// == Memory User Store ==
/// Process-local user store.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns true if the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: &User) -> Result<User> {
        user.validate()?;

        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(UserError::validation(format!(
                "email '{}' already exists",
                user.email
            )));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn update_by_email(&self, email: &str, changes: &UserChanges) -> Result<Option<User>> {
        changes.validate()?;

        // Find and update under one write lock.
        let mut users = self.users.write().await;
        Ok(users.get_mut(email).map(|user| {
            user.apply(changes);
            user.clone()
        }))
    }

    async fn delete_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.write().await.remove(email))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> User {
        User::new("Ann", "ann@x.com", Some(30.into())).unwrap()
    }

    #[tokio::test]
    async fn test_store_create_and_find() {
        let store = MemoryUserStore::new();

        let created = store.create(&ann()).await.unwrap();
        assert_eq!(created, ann());

        let found = store.find_by_email("ann@x.com").await.unwrap();
        assert_eq!(found, Some(ann()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_create_duplicate_email() {
        let store = MemoryUserStore::new();
        store.create(&ann()).await.unwrap();

        let other = User::new("Other", "ann@x.com", None).unwrap();
        let result = store.create(&other).await;

        assert!(matches!(result, Err(UserError::ValidationFailed(_))));
        assert_eq!(store.len().await, 1);
        assert_eq!(store.find_by_email("ann@x.com").await.unwrap(), Some(ann()));
    }

    #[tokio::test]
    async fn test_store_find_missing() {
        let store = MemoryUserStore::new();
        assert_eq!(store.find_by_email("nobody@x.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_update() {
        let store = MemoryUserStore::new();
        store.create(&ann()).await.unwrap();

        let changes = UserChanges {
            name: Some("Annie".to_string()),
            age: Some(31.into()),
        };
        let updated = store
            .update_by_email("ann@x.com", &changes)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Annie");
        assert_eq!(updated.email, "ann@x.com");
        assert_eq!(updated.age, Some(31.into()));
        assert_eq!(
            store.find_by_email("ann@x.com").await.unwrap(),
            Some(updated)
        );
    }

    #[tokio::test]
    async fn test_store_update_missing() {
        let store = MemoryUserStore::new();
        let changes = UserChanges {
            name: Some("Annie".to_string()),
            age: None,
        };
        let result = store.update_by_email("nobody@x.com", &changes).await;
        assert_eq!(result, Ok(None));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_update_rejects_blank_name() {
        let store = MemoryUserStore::new();
        store.create(&ann()).await.unwrap();

        let changes = UserChanges {
            name: Some(" ".to_string()),
            age: None,
        };
        let result = store.update_by_email("ann@x.com", &changes).await;

        assert!(matches!(result, Err(UserError::ValidationFailed(_))));
        assert_eq!(store.find_by_email("ann@x.com").await.unwrap(), Some(ann()));
    }

    #[tokio::test]
    async fn test_store_delete() {
        let store = MemoryUserStore::new();
        store.create(&ann()).await.unwrap();

        assert_eq!(store.delete_by_email("ann@x.com").await.unwrap(), Some(ann()));
        assert_eq!(store.delete_by_email("ann@x.com").await.unwrap(), None);
        assert!(store.is_empty().await);
    }
}
