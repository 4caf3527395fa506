//! Pure query-construction helpers for list endpoints.
//!
//! These helpers turn caller input (page numbers, a free-text term, filter
//! key/value pairs, a sort column) into a [`ListQuery`] that any store can
//! execute. They perform no IO and no column validation; the service checks
//! column names against the entity kind before building a query.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_PAGE: u32 = 1;

/// Default number of rows per page.
pub const DEFAULT_LIMIT: u32 = 10;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than `desc` (case-insensitive) sorts ascending.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub column: String,
    pub order: SortOrder,
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Query-string filter keys that are shorthands for a boolean column.
const BOOLEAN_SYNONYMS: &[(&str, &str)] = &[
    ("published", "is_published"),
    ("is_published", "is_published"),
    ("featured", "is_featured"),
    ("is_featured", "is_featured"),
    ("active", "is_active"),
    ("is_active", "is_active"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Bool(bool),
    Text(String),
}

/// An equality predicate on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equals {
    pub column: String,
    pub value: FilterValue,
}

/// Map filter pairs to equality predicates.
///
/// Boolean synonyms are normalized onto their canonical column and compare
/// against `value == "true"`. Every other key becomes exact text equality.
/// Pairs with an empty value are skipped.
pub fn normalize_filters<'a>(
    filters: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Vec<Equals> {
    filters
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| {
            match BOOLEAN_SYNONYMS.iter().find(|(alias, _)| *alias == key) {
                Some((_, column)) => Equals {
                    column: (*column).to_string(),
                    value: FilterValue::Bool(value == "true"),
                },
                None => Equals {
                    column: key.to_string(),
                    value: FilterValue::Text(value.to_string()),
                },
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Free-text search
// ---------------------------------------------------------------------------

/// OR-combined, case-insensitive substring match over a list of columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchClause {
    pub columns: Vec<String>,
    pub term: String,
}

impl SearchClause {
    /// `ILIKE` pattern for the term with `%`, `_` and `\` escaped so the
    /// match is a plain substring match.
    pub fn like_pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.term.len() + 2);
        escaped.push('%');
        for c in self.term.chars() {
            if matches!(c, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped.push('%');
        escaped
    }

    /// Case-insensitive substring test against one column value.
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.term.to_lowercase())
    }
}

/// Build a search clause, or `None` when the term is blank or no columns
/// are eligible.
pub fn search_clause<S: AsRef<str>>(term: &str, columns: &[S]) -> Option<SearchClause> {
    let term = term.trim();
    if term.is_empty() || columns.is_empty() {
        return None;
    }
    Some(SearchClause {
        columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
        term: term.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

/// A 1-based page and its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub limit: u32,
}

impl PageWindow {
    /// Raise `page` and `limit` to at least 1. Any larger `limit` is kept
    /// as given, so `total_pages` always reflects the requested page size.
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(default_limit).max(1),
        }
    }

    /// Like [`Self::new`], with `limit` also capped at `max_limit`.
    pub fn capped(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
        max_limit: u32,
    ) -> Self {
        let window = Self::new(page, limit, default_limit);
        Self {
            limit: window.limit.min(max_limit),
            ..window
        }
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Inclusive row range `[(page-1)*limit, page*limit-1]`.
    pub fn range(&self) -> (u64, u64) {
        let from = self.offset();
        (from, from + u64::from(self.limit) - 1)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_LIMIT)
    }
}

/// Pagination metadata returned alongside a page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(window: PageWindow, total: u64) -> Self {
        Self {
            page: window.page,
            limit: window.limit,
            total,
            total_pages: total.div_ceil(u64::from(window.limit)),
        }
    }
}

/// A page of records plus its pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

// ---------------------------------------------------------------------------
// Caller input and the assembled query
// ---------------------------------------------------------------------------

/// Raw list parameters as handed over by a route handler.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    /// Columns to search; empty means the entity's defaults.
    pub search_fields: Vec<String>,
    /// Filter key/value pairs in the order they were received.
    pub filters: Vec<(String, String)>,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

/// Everything a store needs to execute one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<SearchClause>,
    pub filters: Vec<Equals>,
    pub sort: Sort,
    pub window: PageWindow,
}

impl ListQuery {
    /// Assemble a query from already-validated parts.
    pub fn build<S: AsRef<str>>(
        params: &ListParams,
        search_fields: &[S],
        default_sort: &str,
    ) -> Self {
        let search = params
            .search
            .as_deref()
            .and_then(|term| search_clause(term, search_fields));

        let filters =
            normalize_filters(params.filters.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let column = params
            .sort_by
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(default_sort)
            .to_string();

        Self {
            search,
            filters,
            sort: Sort {
                column,
                order: params.sort_order,
            },
            window: PageWindow::new(params.page, params.limit, DEFAULT_LIMIT),
        }
    }

    /// Every column the query touches, for validation.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.search
            .iter()
            .flat_map(|s| s.columns.iter().map(String::as_str))
            .chain(self.filters.iter().map(|f| f.column.as_str()))
            .chain(std::iter::once(self.sort.column.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- filters -------------------------------------------------------------

    #[test]
    fn synonyms_normalize_to_boolean_columns() {
        let filters = normalize_filters([
            ("published", "true"),
            ("featured", "false"),
            ("active", "yes"),
        ]);
        assert_eq!(
            filters,
            vec![
                Equals {
                    column: "is_published".into(),
                    value: FilterValue::Bool(true)
                },
                Equals {
                    column: "is_featured".into(),
                    value: FilterValue::Bool(false)
                },
                Equals {
                    column: "is_active".into(),
                    value: FilterValue::Bool(false)
                },
            ]
        );
    }

    #[test]
    fn canonical_boolean_keys_are_also_recognized() {
        let filters = normalize_filters([("is_published", "true")]);
        assert_eq!(filters[0].column, "is_published");
        assert_eq!(filters[0].value, FilterValue::Bool(true));
    }

    #[test]
    fn other_keys_become_text_equality() {
        let filters = normalize_filters([("category", "residential")]);
        assert_eq!(
            filters,
            vec![Equals {
                column: "category".into(),
                value: FilterValue::Text("residential".into())
            }]
        );
    }

    #[test]
    fn empty_values_are_skipped() {
        assert!(normalize_filters([("category", "")]).is_empty());
    }

    // -- search --------------------------------------------------------------

    #[test]
    fn blank_search_yields_no_clause() {
        assert_eq!(search_clause("   ", &["title"]), None);
        assert_eq!(search_clause("side", &[] as &[&str]), None);
    }

    #[test]
    fn search_term_is_trimmed() {
        let clause = search_clause("  side ", &["title", "description"]).unwrap();
        assert_eq!(clause.term, "side");
        assert_eq!(clause.columns, vec!["title", "description"]);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        let clause = search_clause("50%_off\\", &["title"]).unwrap();
        assert_eq!(clause.like_pattern(), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn matches_is_case_insensitive_substring() {
        let clause = search_clause("SIDE", &["title"]).unwrap();
        assert!(clause.matches("Riverside House"));
        assert!(!clause.matches("Urban Loft"));
    }

    // -- paging --------------------------------------------------------------

    #[test]
    fn window_range_is_inclusive() {
        let window = PageWindow::new(Some(2), Some(10), DEFAULT_LIMIT);
        assert_eq!(window.offset(), 10);
        assert_eq!(window.range(), (10, 19));
    }

    #[test]
    fn window_raises_page_and_limit_to_one() {
        let window = PageWindow::new(Some(0), Some(0), DEFAULT_LIMIT);
        assert_eq!(window.page, 1);
        assert_eq!(window.limit, 1);
    }

    #[test]
    fn window_keeps_large_limit() {
        let window = PageWindow::new(Some(1), Some(200), DEFAULT_LIMIT);
        assert_eq!(window.limit, 200);
        assert_eq!(Pagination::new(window, 150).total_pages, 1);
    }

    #[test]
    fn capped_window_bounds_limit() {
        let window = PageWindow::capped(Some(0), Some(1000), DEFAULT_LIMIT, 50);
        assert_eq!(window.page, 1);
        assert_eq!(window.limit, 50);

        let window = PageWindow::capped(None, None, DEFAULT_LIMIT, 50);
        assert_eq!(window.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn total_pages_rounds_up() {
        let window = PageWindow::new(Some(1), Some(10), DEFAULT_LIMIT);
        assert_eq!(Pagination::new(window, 0).total_pages, 0);
        assert_eq!(Pagination::new(window, 10).total_pages, 1);
        assert_eq!(Pagination::new(window, 11).total_pages, 2);
        assert_eq!(Pagination::new(window, 25).total_pages, 3);
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let window = PageWindow::new(Some(1), Some(5), DEFAULT_LIMIT);
        let json = serde_json::to_value(Pagination::new(window, 12)).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["total"], 12);
    }

    // -- assembly ------------------------------------------------------------

    #[test]
    fn build_defaults_sort_and_window() {
        let query = ListQuery::build(&ListParams::default(), &["title"], "sort_order");
        assert_eq!(query.sort.column, "sort_order");
        assert_eq!(query.sort.order, SortOrder::Asc);
        assert_eq!(query.window.page, 1);
        assert_eq!(query.window.limit, DEFAULT_LIMIT);
        assert!(query.search.is_none());
    }

    #[test]
    fn columns_lists_everything_touched() {
        let params = ListParams {
            search: Some("loft".into()),
            filters: vec![("published".into(), "true".into())],
            sort_by: Some("title".into()),
            ..Default::default()
        };
        let query = ListQuery::build(&params, &["title", "description"], "sort_order");
        let cols: Vec<&str> = query.columns().collect();
        assert_eq!(cols, vec!["title", "description", "is_published", "title"]);
    }

    #[test]
    fn sort_order_parse_defaults_to_ascending() {
        assert_eq!(SortOrder::parse("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("sideways"), SortOrder::Asc);
    }
}
