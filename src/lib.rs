//! User Cache API - user CRUD over a document store with a cache-aside layer
//!
//! The store is authoritative; the cache keeps a JSON copy of each user
//! keyed by email.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use error::UserError;
pub use service::{Lookup, UserService};
