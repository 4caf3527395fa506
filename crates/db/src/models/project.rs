//! Portfolio projects.

use atelier_core::entity::EntityKind;
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `projects` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub year: Option<i32>,
    pub client: Option<String>,
    pub area: Option<String>,
    pub status: Option<String>,
    pub featured_image: Option<String>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Entity kind for `/api/admin/projects`.
pub struct Projects;

impl EntityKind for Projects {
    type Record = Project;

    const TABLE: &'static str = "projects";
    const LABEL: &'static str = "project";
    const PLURAL: &'static str = "projects";
    const DISPLAY_NAME: &'static str = "Project";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "slug",
        "description",
        "content",
        "category",
        "location",
        "year",
        "client",
        "area",
        "status",
        "featured_image",
        "gallery_images",
        "is_published",
        "is_featured",
        "sort_order",
        "created_at",
        "updated_at",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "description", "location"];
    const REQUIRED_FIELDS: &'static [&'static str] = &["title", "slug", "category"];
    const UPDATABLE_FIELDS: &'static [&'static str] = &[
        "title",
        "slug",
        "description",
        "content",
        "category",
        "location",
        "year",
        "client",
        "area",
        "status",
        "featured_image",
        "gallery_images",
        "is_published",
        "is_featured",
        "sort_order",
    ];
    const FILTER_KEYS: &'static [&'static str] = &["published", "featured", "category"];
    const VISIBILITY_COLUMN: &'static str = "is_published";
}
