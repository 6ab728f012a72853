//! API Handlers
//!
//! HTTP request handlers for each user endpoint. Each one performs a single
//! service call and serializes the outcome.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::cache::{MemoryCache, UserCache};
use crate::config::Config;
use crate::error::Result;
use crate::models::{CreateUserRequest, HealthResponse, MessageResponse, UpdateUserRequest, User};
use crate::service::UserService;
use crate::store::{MemoryUserStore, UserStore};

/// Application state shared across all handlers.
///
/// Holds the long-lived store and cache handles, created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
}

impl AppState {
    /// Creates a new AppState over the given collaborators.
    pub fn new(store: Arc<dyn UserStore>, cache: Arc<dyn UserCache>) -> Self {
        Self {
            users: UserService::new(store, cache),
        }
    }

    /// Creates an AppState backed entirely by in-memory collaborators.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryUserStore::new()), Arc::new(MemoryCache::new()))
    }

    /// Connects the backends selected by the configuration.
    ///
    /// Unset `MONGO_URI` / `REDIS_HOST` fall back to in-memory collaborators.
    pub async fn connect(config: &Config) -> Result<Self> {
        let store = connect_store(config).await?;
        let cache = connect_cache(config).await?;
        Ok(Self::new(store, cache))
    }
}

#[cfg(feature = "mongo")]
async fn connect_store(config: &Config) -> Result<Arc<dyn UserStore>> {
    match &config.mongo_uri {
        Some(uri) => {
            let store = crate::store::MongoUserStore::connect(uri, &config.mongo_database).await?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("MONGO_URI not set, using in-memory store");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}

#[cfg(not(feature = "mongo"))]
async fn connect_store(config: &Config) -> Result<Arc<dyn UserStore>> {
    if config.mongo_uri.is_some() {
        return Err(crate::error::UserError::unavailable(
            "MONGO_URI is set but the `mongo` feature is disabled",
        ));
    }
    warn!("Using in-memory store");
    Ok(Arc::new(MemoryUserStore::new()))
}

#[cfg(feature = "redis")]
async fn connect_cache(config: &Config) -> Result<Arc<dyn UserCache>> {
    match config.redis_url() {
        Some(url) => Ok(Arc::new(crate::cache::RedisCache::connect(&url).await?)),
        None => {
            warn!("REDIS_HOST not set, using in-memory cache");
            Ok(Arc::new(MemoryCache::new()))
        }
    }
}

#[cfg(not(feature = "redis"))]
async fn connect_cache(config: &Config) -> Result<Arc<dyn UserCache>> {
    if config.redis_host.is_some() {
        return Err(crate::error::UserError::unavailable(
            "REDIS_HOST is set but the `redis` feature is disabled",
        ));
    }
    warn!("Using in-memory cache");
    Ok(Arc::new(MemoryCache::new()))
}

/// Handler for POST /users
///
/// Persists the user, mirrors it into the cache, and returns it with 201.
pub async fn create_user_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let Json(req) = payload?;
    let user = req.into_user()?;
    let created = state.users.create(user).await?;

    info!("Created user '{}'", created.email);
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /users/:email
///
/// Serves from the cache when possible, otherwise from the store.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<User>> {
    let user = state.users.get(&email).await?;
    Ok(Json(user))
}

/// Handler for PUT /users/:email
///
/// Updates name and/or age; the email in the path is never changed.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
    payload: std::result::Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>> {
    let Json(req) = payload?;
    let changes = req.into_changes()?;
    let updated = state.users.update(&email, &changes).await?;

    info!("Updated user '{}'", email);
    Ok(Json(updated))
}

/// Handler for DELETE /users/:email
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.users.delete(&email).await?;

    info!("Removed user '{}'", email);
    Ok(Json(MessageResponse::user_removed()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
