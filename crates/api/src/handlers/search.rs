//! Handler for `GET /api/public/search`.

use atelier_core::query::PageWindow;
use atelier_core::search::{SearchScope, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::extract::QueryParams;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

/// `data` is an array for a single category, or an object keyed by
/// category plus a combined `all` array when every category was searched.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub data: Value,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

/// GET /api/public/search?q=&type=&limit=&page=
pub async fn search(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let term = params.q.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Err(AppError::BadRequest("Search query is required".into()));
    }

    let scope = SearchScope::parse(params.kind.as_deref())
        .ok_or_else(|| AppError::BadRequest("Invalid search type".into()))?;
    let window = PageWindow::capped(
        params.page,
        params.limit,
        DEFAULT_SEARCH_LIMIT,
        MAX_SEARCH_LIMIT,
    );

    let hits = state.public_search().search(term, scope, window).await?;
    let total: u64 = hits.iter().map(|h| h.total).sum();

    let data = match scope {
        SearchScope::Only(_) => Value::Array(hits.into_iter().flat_map(|h| h.items).collect()),
        SearchScope::All => {
            let mut by_category = Map::new();
            let mut all = Vec::new();
            for hit in hits {
                let key = hit.category.key();
                all.extend(hit.items.iter().cloned().map(|item| tag(item, key)));
                by_category.insert(key.to_string(), Value::Array(hit.items));
            }
            by_category.insert("all".to_string(), Value::Array(all));
            Value::Object(by_category)
        }
    };

    Ok(Json(SearchResponse {
        data,
        total,
        page: window.page,
        limit: window.limit,
    }))
}

/// Mark an item with the category it came from.
fn tag(item: Value, key: &str) -> Value {
    match item {
        Value::Object(mut map) => {
            map.insert("type".to_string(), Value::String(key.to_string()));
            Value::Object(map)
        }
        other => other,
    }
}
