//! Editorial "explore" content: articles, news and insights.

use atelier_core::entity::EntityKind;
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `explore_content` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploreItem {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content_type: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: Option<Timestamp>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub struct ExploreContent;

impl EntityKind for ExploreContent {
    type Record = ExploreItem;

    const TABLE: &'static str = "explore_content";
    const LABEL: &'static str = "explore item";
    const PLURAL: &'static str = "explore items";
    const DISPLAY_NAME: &'static str = "Explore item";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "slug",
        "content_type",
        "excerpt",
        "content",
        "featured_image",
        "author",
        "tags",
        "published_at",
        "is_published",
        "is_featured",
        "sort_order",
        "created_at",
        "updated_at",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "excerpt", "content"];
    const REQUIRED_FIELDS: &'static [&'static str] = &["title", "slug", "content_type"];
    const UPDATABLE_FIELDS: &'static [&'static str] = &[
        "title",
        "slug",
        "content_type",
        "excerpt",
        "content",
        "featured_image",
        "author",
        "tags",
        "published_at",
        "is_published",
        "is_featured",
        "sort_order",
    ];
    const FILTER_KEYS: &'static [&'static str] = &["published", "featured", "content_type"];
    const VISIBILITY_COLUMN: &'static str = "is_published";
}
