//! Services offered by the practice (architecture, interiors, planning...).

use atelier_core::entity::EntityKind;
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `services` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub struct Services;

impl EntityKind for Services {
    type Record = Service;

    const TABLE: &'static str = "services";
    const LABEL: &'static str = "service";
    const PLURAL: &'static str = "services";
    const DISPLAY_NAME: &'static str = "Service";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "slug",
        "description",
        "content",
        "icon",
        "features",
        "is_published",
        "is_featured",
        "sort_order",
        "created_at",
        "updated_at",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "description"];
    const REQUIRED_FIELDS: &'static [&'static str] = &["title", "slug", "description"];
    const UPDATABLE_FIELDS: &'static [&'static str] = &[
        "title",
        "slug",
        "description",
        "content",
        "icon",
        "features",
        "is_published",
        "is_featured",
        "sort_order",
    ];
    const FILTER_KEYS: &'static [&'static str] = &["published", "featured"];
    const VISIBILITY_COLUMN: &'static str = "is_published";
}
