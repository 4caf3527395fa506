//! Public aggregate search: categories and paging defaults.

use serde::Serialize;

/// Default number of results per category page.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Maximum number of results per category page.
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// A searchable content category, keyed as it appears in the `type` query
/// parameter and in the aggregated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCategory {
    Projects,
    Team,
    Services,
    Explore,
    Partners,
}

impl SearchCategory {
    pub const ALL: [SearchCategory; 5] = [
        Self::Projects,
        Self::Team,
        Self::Services,
        Self::Explore,
        Self::Partners,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Team => "team",
            Self::Services => "services",
            Self::Explore => "explore",
            Self::Partners => "partners",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == value)
    }
}

/// Which categories one search request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    All,
    Only(SearchCategory),
}

impl SearchScope {
    /// Parse the `type` parameter. Missing, empty or `all` means every
    /// category; an unknown value yields `None`.
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value.map(str::trim) {
            None | Some("") | Some("all") => Some(Self::All),
            Some(other) => SearchCategory::parse(other).map(Self::Only),
        }
    }

    pub fn categories(self) -> Vec<SearchCategory> {
        match self {
            Self::All => SearchCategory::ALL.to_vec(),
            Self::Only(category) => vec![category],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_defaults_to_all() {
        assert_eq!(SearchScope::parse(None), Some(SearchScope::All));
        assert_eq!(SearchScope::parse(Some("")), Some(SearchScope::All));
        assert_eq!(SearchScope::parse(Some("all")), Some(SearchScope::All));
    }

    #[test]
    fn scope_parses_single_category() {
        assert_eq!(
            SearchScope::parse(Some("team")),
            Some(SearchScope::Only(SearchCategory::Team))
        );
        assert_eq!(SearchScope::parse(Some("blog")), None);
    }

    #[test]
    fn all_scope_covers_every_category_in_order() {
        let keys: Vec<&str> = SearchScope::All
            .categories()
            .into_iter()
            .map(SearchCategory::key)
            .collect();
        assert_eq!(keys, vec!["projects", "team", "services", "explore", "partners"]);
    }
}
