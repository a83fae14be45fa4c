use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;

/// Public auth routes (no authentication required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .with_state(service)
}

/// Protected auth routes (require a bearer token)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route(
            "/api/auth/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/api/auth/password", put(handlers::change_password))
        .with_state(service)
}
