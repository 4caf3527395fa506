use atelier_core::entity::EntityKind;
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `team_members` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub position: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub struct Team;

impl EntityKind for Team {
    type Record = TeamMember;

    const TABLE: &'static str = "team_members";
    const LABEL: &'static str = "team member";
    const PLURAL: &'static str = "team members";
    const DISPLAY_NAME: &'static str = "Team member";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "slug",
        "position",
        "department",
        "bio",
        "email",
        "image_url",
        "linkedin_url",
        "is_active",
        "sort_order",
        "created_at",
        "updated_at",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "position", "bio"];
    const REQUIRED_FIELDS: &'static [&'static str] = &["name", "slug", "position"];
    const UPDATABLE_FIELDS: &'static [&'static str] = &[
        "name",
        "slug",
        "position",
        "department",
        "bio",
        "email",
        "image_url",
        "linkedin_url",
        "is_active",
        "sort_order",
    ];
    const FILTER_KEYS: &'static [&'static str] = &["active", "department"];
    const VISIBILITY_COLUMN: &'static str = "is_active";
}
