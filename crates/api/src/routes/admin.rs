use atelier_core::entity::EntityKind;
use atelier_db::models::{AdminUsers, ExploreContent, Partners, Projects, Services, Team};
use axum::routing::get;
use axum::Router;

use crate::handlers::entity;
use crate::state::AppState;

/// Mount list/create and get/update/delete for kind `E` under `/{segment}`.
fn entity_routes<E: EntityKind>(router: Router<AppState>, segment: &str) -> Router<AppState> {
    router
        .route(
            &format!("/{segment}"),
            get(entity::list::<E>).post(entity::create::<E>),
        )
        .route(
            &format!("/{segment}/{{id}}"),
            get(entity::get_by_id::<E>)
                .put(entity::update::<E>)
                .delete(entity::delete::<E>),
        )
}

/// Admin CRUD routes, mounted at `/api/admin`.
pub fn router() -> Router<AppState> {
    let router = Router::new();
    let router = entity_routes::<Projects>(router, "projects");
    let router = entity_routes::<Team>(router, "team");
    let router = entity_routes::<Services>(router, "services");
    let router = entity_routes::<ExploreContent>(router, "explore");
    let router = entity_routes::<Partners>(router, "partners");
    entity_routes::<AdminUsers>(router, "users")
}
