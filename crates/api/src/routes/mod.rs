pub mod admin;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /admin/projects              list, create
/// /admin/projects/{id}         get, update, delete
/// /admin/team                  (same shape for team, services, explore,
/// /admin/services               partners and users)
/// /admin/explore
/// /admin/partners
/// /admin/users
///
/// /public/search               aggregate search over published content
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/admin", admin::router())
        .nest("/public", public::router())
}
