use atelier_core::entity::EntityKind;
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A row from the `partners` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub partner_type: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partners accept any known writable column on update.
pub struct Partners;

impl EntityKind for Partners {
    type Record = Partner;

    const TABLE: &'static str = "partners";
    const LABEL: &'static str = "partner";
    const PLURAL: &'static str = "partners";
    const DISPLAY_NAME: &'static str = "Partner";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "slug",
        "partner_type",
        "description",
        "logo_url",
        "website_url",
        "is_active",
        "sort_order",
        "created_at",
        "updated_at",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "description"];
    const REQUIRED_FIELDS: &'static [&'static str] = &["name", "slug"];
    const UPDATABLE_FIELDS: &'static [&'static str] = &[];
    const FILTER_KEYS: &'static [&'static str] = &["active", "partner_type"];
    const VISIBILITY_COLUMN: &'static str = "is_active";
}
