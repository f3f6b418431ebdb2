//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health   - Health check
//!
//! # Console
//! GET  /         - Form page for all five operations
//!
//! # Users (relayed to the identity provider, one call per route)
//! POST /create   - Create a user (form: email, password, displayName)
//! GET  /get      - Fetch a user (query: uid)
//! GET  /list     - List the provider's first page of users
//! POST /update   - Update a user's display name (form: uid, displayName)
//! POST /delete   - Delete a user (form: uid)
//! ```

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod home;
pub mod users;

/// Build the application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/create", post(users::create))
        .route("/get", get(users::show))
        .route("/list", get(users::list))
        .route("/update", post(users::update))
        .route("/delete", post(users::delete))
}
