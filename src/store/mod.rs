//! Store Module
//!
//! The authoritative user store. Handlers reach it only through the
//! `UserStore` trait so backends can be swapped at startup.

mod memory;
#[cfg(feature = "mongo")]
mod mongo;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{User, UserChanges};

pub use memory::MemoryUserStore;
#[cfg(feature = "mongo")]
pub use mongo::MongoUserStore;

// == User Store ==
/// Persistent, authoritative user storage keyed by email.
///
/// Lookups that match nothing return `Ok(None)`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user. Fails with `ValidationFailed` if the email is taken.
    async fn create(&self, user: &User) -> Result<User>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Atomically applies `changes` to the matching user and returns the
    /// post-update record.
    async fn update_by_email(&self, email: &str, changes: &UserChanges) -> Result<Option<User>>;

    /// Atomically removes the matching user and returns it.
    async fn delete_by_email(&self, email: &str) -> Result<Option<User>>;
}
