//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::index_handler;
use axum::{Router, routing::get};
use tower_http::services::ServeDir;

/// Public web routes.
///
/// # Endpoints
///
/// - `GET /`          - Landing page with the shortening form
/// - `GET /public/*`  - Static assets
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .nest_service("/public", ServeDir::new("public"))
}
