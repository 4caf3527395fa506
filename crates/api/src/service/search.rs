//! Public aggregate search over published content.
//!
//! Runs on the restricted store. Each category is queried on its own, with
//! its own page window and total, and only rows whose visibility column is
//! true are returned.

use std::sync::Arc;

use atelier_core::entity::EntityKind;
use atelier_core::error::CoreError;
use atelier_core::query::{ListParams, ListQuery, PageWindow};
use atelier_core::search::{SearchCategory, SearchScope};
use atelier_db::models::{ExploreContent, Partners, Projects, Services, Team};
use atelier_db::store::RecordReader;
use serde_json::Value;

/// Matches from one category.
#[derive(Debug, Clone)]
pub struct CategoryHits {
    pub category: SearchCategory,
    pub items: Vec<Value>,
    /// Matches across all pages of this category.
    pub total: u64,
}

pub struct PublicSearch {
    reader: Arc<dyn RecordReader>,
}

impl PublicSearch {
    pub fn new(reader: Arc<dyn RecordReader>) -> Self {
        Self { reader }
    }

    /// Search every category in `scope`, in category order.
    pub async fn search(
        &self,
        term: &str,
        scope: SearchScope,
        window: PageWindow,
    ) -> Result<Vec<CategoryHits>, CoreError> {
        let mut results = Vec::new();
        for category in scope.categories() {
            let (items, total) = match category {
                SearchCategory::Projects => self.search_kind::<Projects>(term, window).await?,
                SearchCategory::Team => self.search_kind::<Team>(term, window).await?,
                SearchCategory::Services => self.search_kind::<Services>(term, window).await?,
                SearchCategory::Explore => self.search_kind::<ExploreContent>(term, window).await?,
                SearchCategory::Partners => self.search_kind::<Partners>(term, window).await?,
            };
            results.push(CategoryHits {
                category,
                items,
                total,
            });
        }
        Ok(results)
    }

    async fn search_kind<E: EntityKind>(
        &self,
        term: &str,
        window: PageWindow,
    ) -> Result<(Vec<Value>, u64), CoreError> {
        let params = ListParams {
            search: Some(term.to_string()),
            filters: vec![(E::VISIBILITY_COLUMN.to_string(), "true".to_string())],
            ..Default::default()
        };
        let mut query = ListQuery::build(&params, E::SEARCH_FIELDS, E::DEFAULT_SORT);
        query.window = window;

        let (rows, total) = self
            .reader
            .select_page(E::TABLE, E::COLUMNS, &query)
            .await
            .map_err(|e| {
                tracing::error!(entity = E::TABLE, error = %e, "Public search failed");
                CoreError::failed("search", "content")
            })?;

        Ok((rows.into_iter().map(Value::Object).collect(), total))
    }
}
