//! API Module
//!
//! HTTP handlers and routing for the user REST API.
//!
//! # Endpoints
//! - `POST /users` - Create a user
//! - `GET /users/:email` - Read a user (cache first, then store)
//! - `PUT /users/:email` - Update a user's name/age
//! - `DELETE /users/:email` - Delete a user
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
