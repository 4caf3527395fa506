//! Admin profiles: the users of the admin panel.
//!
//! A profile links an identity-provider user (`user_id`, the token subject)
//! to a role and an active flag. Only active profiles pass the access check.

use atelier_core::entity::EntityKind;
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `admin_profiles` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: DbId,
    pub user_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Entity kind for `/api/admin/users`.
pub struct AdminUsers;

impl EntityKind for AdminUsers {
    type Record = AdminProfile;

    const TABLE: &'static str = "admin_profiles";
    const LABEL: &'static str = "user";
    const PLURAL: &'static str = "users";
    const DISPLAY_NAME: &'static str = "User";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "user_id",
        "email",
        "full_name",
        "role",
        "is_active",
        "created_at",
        "updated_at",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["email", "full_name"];
    const REQUIRED_FIELDS: &'static [&'static str] = &["user_id", "email", "role"];
    const UPDATABLE_FIELDS: &'static [&'static str] = &["email", "full_name", "role", "is_active"];
    const FILTER_KEYS: &'static [&'static str] = &["active", "role"];
    const VISIBILITY_COLUMN: &'static str = "is_active";
    const DEFAULT_SORT: &'static str = "created_at";
    const LABEL_FIELDS: &'static [&'static str] = &["full_name", "email"];
}
