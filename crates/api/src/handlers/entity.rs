//! Generic handlers for every `/api/admin/{entity}` resource.
//!
//! Each handler is instantiated once per entity kind in
//! [`crate::routes::admin`]; the kind decides table, labels, record shape and
//! which query-string keys are forwarded as filters.

use std::collections::HashMap;

use atelier_core::entity::EntityKind;
use atelier_core::error::CoreError;
use atelier_core::query::{ListParams, Page, SortOrder};
use atelier_core::types::{DbId, Row};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::auth::session::MaybeSession;
use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, QueryParams};
use crate::response::{DataResponse, MessageResponse};
use crate::service::Deleted;
use crate::state::AppState;

/// Turn the raw query string into list parameters.
///
/// `page` and `limit` that fail to parse fall back to defaults. Only the
/// kind's filter keys are forwarded, in declaration order.
pub fn list_params<E: EntityKind>(query: &HashMap<String, String>) -> ListParams {
    let number = |key: &str| query.get(key).and_then(|v| v.trim().parse::<u32>().ok());

    ListParams {
        page: number("page"),
        limit: number("limit"),
        search: query.get("search").cloned(),
        search_fields: query
            .get("search_fields")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
        filters: E::FILTER_KEYS
            .iter()
            .filter_map(|key| query.get(*key).map(|v| ((*key).to_string(), v.clone())))
            .collect(),
        sort_by: query.get("sort_by").cloned(),
        sort_order: query
            .get("sort_order")
            .map(String::as_str)
            .map(SortOrder::parse)
            .unwrap_or_default(),
    }
}

/// GET /api/admin/{entity}
pub async fn list<E: EntityKind>(
    State(state): State<AppState>,
    session: MaybeSession,
    QueryParams(query): QueryParams<HashMap<String, String>>,
) -> AppResult<Json<Page<E::Record>>> {
    let params = list_params::<E>(&query);
    let page = state.service::<E>().list(session.session(), &params).await?;
    Ok(Json(page))
}

/// GET /api/admin/{entity}/{id}
pub async fn get_by_id<E: EntityKind>(
    State(state): State<AppState>,
    session: MaybeSession,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<E::Record>>> {
    let record = state.service::<E>().get_by_id(session.session(), &id).await?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/admin/{entity}
///
/// A duplicate slug is a 400 here, matching other payload problems.
pub async fn create<E: EntityKind>(
    State(state): State<AppState>,
    session: MaybeSession,
    JsonBody(input): JsonBody<Row>,
) -> AppResult<(StatusCode, Json<DataResponse<E::Record>>)> {
    let record = state
        .service::<E>()
        .create(session.session(), input)
        .await
        .map_err(|e| match e {
            CoreError::Conflict(msg) => AppError::BadRequest(msg),
            other => AppError::Core(other),
        })?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// PUT /api/admin/{entity}/{id}
pub async fn update<E: EntityKind>(
    State(state): State<AppState>,
    session: MaybeSession,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<Row>,
) -> AppResult<Json<DataResponse<E::Record>>> {
    let record = state
        .service::<E>()
        .update(session.session(), &id, input)
        .await?;
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/admin/{entity}/{id}
pub async fn delete<E: EntityKind>(
    State(state): State<AppState>,
    session: MaybeSession,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse<Deleted>>> {
    let deleted = state.service::<E>().delete(session.session(), &id).await?;
    Ok(Json(MessageResponse {
        message: format!("{} deleted successfully", E::DISPLAY_NAME),
        data: deleted,
    }))
}
