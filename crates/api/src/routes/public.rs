use axum::routing::get;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Public read-only routes, mounted at `/api/public`.
pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search::search))
}
