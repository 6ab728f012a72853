//! API Routes
//!
//! Configures the Axum router with all user endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_user_handler, delete_user_handler, get_user_handler, health_handler,
    update_user_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /users` - Create a user
/// - `GET /users/:email` - Read a user
/// - `PUT /users/:email` - Update a user
/// - `DELETE /users/:email` - Delete a user
/// - `GET /health` - Health check endpoint
///
/// Anything else gets axum's default 404.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/users", post(create_user_handler))
        .route(
            "/users/:email",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
