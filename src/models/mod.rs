//! Data model and DTOs for the user API
//!
//! This module defines the `User` record and the types used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;
pub mod user;

// Re-export commonly used types
pub use requests::{CreateUserRequest, UpdateUserRequest};
pub use responses::{ErrorResponse, HealthResponse, MessageResponse};
pub use user::{User, UserChanges};
