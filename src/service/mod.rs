//! User Service
//!
//! Cache-aside orchestration over the store and the cache. The store is the
//! source of truth; the cache holds a non-owning JSON copy keyed by email.
//!
//! Once a store mutation commits, the result reflects the store. Cache
//! failures after that point are logged and never turn a success into an
//! error.


use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::UserCache;
use crate::error::{Result, UserError};
use crate::models::{User, UserChanges};
use crate::store::UserStore;

// == Lookup ==
/// Outcome of a cache-then-store read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Served from the cache without consulting the store
    FromCache(User),
    /// Cache miss, found in the store, cache repopulated (best-effort)
    FromStoreRepopulated(User),
    /// Not in the cache and not in the store
    Absent,
}

impl Lookup {
    /// Returns the user, if one was found.
    pub fn into_user(self) -> Option<User> {
        match self {
            Lookup::FromCache(user) | Lookup::FromStoreRepopulated(user) => Some(user),
            Lookup::Absent => None,
        }
    }
}

// == User Service ==
/// Store and cache handles, built once at startup and shared by all requests.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    cache: Arc<dyn UserCache>,
}

impl UserService {
    /// Creates a service over the given collaborators.
    pub fn new(store: Arc<dyn UserStore>, cache: Arc<dyn UserCache>) -> Self {
        Self { store, cache }
    }

    // == Create ==
    /// Persists a new user, then mirrors it into the cache.
    pub async fn create(&self, user: User) -> Result<User> {
        let created = self.store.create(&user).await?;
        self.write_through(&created).await;
        Ok(created)
    }

    // == Lookup ==
    /// Reads a user from the cache, falling back to the store.
    ///
    /// Cache hits are not re-verified against the store.
    pub async fn lookup(&self, email: &str) -> Result<Lookup> {
        match self.cache.get(email).await {
            Ok(Some(value)) => match User::from_cache_value(&value) {
                Ok(user) => {
                    debug!("Cache hit for '{}'", email);
                    return Ok(Lookup::FromCache(user));
                }
                Err(e) => warn!("Discarding unreadable cache entry for '{}': {}", email, e),
            },
            Ok(None) => debug!("Cache miss for '{}'", email),
            Err(e) => warn!("Cache read failed for '{}', using store: {}", email, e),
        }

        match self.store.find_by_email(email).await? {
            Some(user) => {
                self.write_through(&user).await;
                Ok(Lookup::FromStoreRepopulated(user))
            }
            None => Ok(Lookup::Absent),
        }
    }

    /// Like `lookup`, but maps `Absent` to `NotFound`.
    pub async fn get(&self, email: &str) -> Result<User> {
        self.lookup(email)
            .await?
            .into_user()
            .ok_or(UserError::NotFound)
    }

    // == Update ==
    /// Updates the store, then replaces the cached copy.
    pub async fn update(&self, email: &str, changes: &UserChanges) -> Result<User> {
        let updated = self
            .store
            .update_by_email(email, changes)
            .await?
            .ok_or(UserError::NotFound)?;

        if let Err(e) = self.set_cached(&updated).await {
            // A stale copy must not outlive a committed update.
            warn!("Cache refresh failed for '{}', invalidating: {}", email, e);
            if let Err(e) = self.cache.del(email).await {
                warn!("Cache invalidation failed for '{}': {}", email, e);
            }
        }
        Ok(updated)
    }

    // == Delete ==
    /// Removes the user from the store, then drops the cached copy.
    pub async fn delete(&self, email: &str) -> Result<User> {
        let removed = self
            .store
            .delete_by_email(email)
            .await?
            .ok_or(UserError::NotFound)?;

        if let Err(e) = self.cache.del(email).await {
            warn!("Cache removal failed for '{}': {}", email, e);
        }
        Ok(removed)
    }

    async fn set_cached(&self, user: &User) -> Result<()> {
        let value = user.to_cache_value()?;
        self.cache.set(&user.email, &value).await
    }

    async fn write_through(&self, user: &User) {
        if let Err(e) = self.set_cached(user).await {
            warn!("Cache write failed for '{}': {}", user.email, e);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;

    use crate::cache::{MemoryCache, UserCache};
    use crate::error::{Result, UserError};
    use crate::models::{User, UserChanges};
    use crate::store::UserStore;

    /// Store whose every call fails, as if MongoDB were down.
    pub struct FailingStore;

    #[async_trait]
    impl UserStore for FailingStore {
        async fn create(&self, _user: &User) -> Result<User> {
            Err(UserError::unavailable("store down"))
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<User>> {
            Err(UserError::unavailable("store down"))
        }

        async fn update_by_email(&self, _email: &str, _changes: &UserChanges) -> Result<Option<User>> {
            Err(UserError::unavailable("store down"))
        }

        async fn delete_by_email(&self, _email: &str) -> Result<Option<User>> {
            Err(UserError::unavailable("store down"))
        }
    }

    /// Cache that rejects writes but still reads and deletes.
    #[derive(Default)]
    pub struct SetFailingCache {
        pub inner: MemoryCache,
    }

    #[async_trait]
    impl UserCache for SetFailingCache {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(UserError::unavailable("cache rejected write"))
        }

        async fn del(&self, key: &str) -> Result<()> {
            self.inner.del(key).await
        }
    }

    /// Cache whose every call fails, as if Redis were down.
    pub struct FailingCache;

    #[async_trait]
    impl UserCache for FailingCache {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(UserError::unavailable("cache down"))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(UserError::unavailable("cache down"))
        }

        async fn del(&self, _key: &str) -> Result<()> {
            Err(UserError::unavailable("cache down"))
        }
    }
}
