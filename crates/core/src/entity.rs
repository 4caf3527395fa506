//! The contract binding one managed table to the generic entity service.
//!
//! Each entity kind is a zero-sized marker type whose associated constants
//! describe the table: its name, human labels, the columns of its record
//! shape, and which of those columns the service may search, require, update
//! or filter on. Every column name arriving from a caller is checked against
//! [`EntityKind::COLUMNS`] before it reaches a store.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CoreError;

/// Columns fetched, together with the label fields, when the service only
/// needs to confirm a record exists and capture its slug and display label.
pub const LOOKUP_COLUMNS: &[&str] = &["id", "slug"];

/// Columns the store assigns; never accepted from a payload.
pub const SERVER_ASSIGNED_COLUMNS: &[&str] = &["id", "created_at", "updated_at"];

pub trait EntityKind: Send + Sync + 'static {
    /// Concrete record shape returned to callers.
    type Record: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Table name in the store.
    const TABLE: &'static str;

    /// Lower-case singular label used in messages (`"team member"`).
    const LABEL: &'static str;

    /// Lower-case plural label (`"team members"`).
    const PLURAL: &'static str;

    /// Capitalized label used in not-found messages (`"Team member"`).
    const DISPLAY_NAME: &'static str;

    /// Every column of [`Self::Record`], in select order.
    const COLUMNS: &'static [&'static str];

    /// Columns eligible for free-text search when the caller names none.
    const SEARCH_FIELDS: &'static [&'static str];

    /// Fields that must be present and truthy on create.
    const REQUIRED_FIELDS: &'static [&'static str];

    /// Fields copied from an update payload. Empty means every writable key
    /// in the payload is passed through.
    const UPDATABLE_FIELDS: &'static [&'static str];

    /// Query-string keys the list route forwards as filters.
    const FILTER_KEYS: &'static [&'static str];

    /// Boolean column that makes a record publicly visible.
    const VISIBILITY_COLUMN: &'static str;

    /// Column used when the caller does not choose a sort.
    const DEFAULT_SORT: &'static str = "sort_order";

    /// Columns tried in order for a record's human label in the activity log.
    const LABEL_FIELDS: &'static [&'static str] = &["name", "title"];
}

/// Whether `column` belongs to the record shape of `E`.
pub fn has_column<E: EntityKind>(column: &str) -> bool {
    E::COLUMNS.contains(&column)
}

/// Whether records of `E` carry a unique slug.
pub fn has_slug<E: EntityKind>() -> bool {
    has_column::<E>("slug")
}

/// Reject any column name that is not part of `E`'s record shape.
pub fn check_columns<'a, E: EntityKind>(
    columns: impl IntoIterator<Item = &'a str>,
) -> Result<(), CoreError> {
    let unknown: Vec<&str> = columns
        .into_iter()
        .filter(|c| !has_column::<E>(c))
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown {} field(s): {}",
            E::LABEL,
            unknown.join(", ")
        )))
    }
}

/// [`LOOKUP_COLUMNS`] plus `E`'s label fields, limited to columns `E` has.
pub fn lookup_columns<E: EntityKind>() -> Vec<&'static str> {
    LOOKUP_COLUMNS
        .iter()
        .chain(E::LABEL_FIELDS)
        .copied()
        .filter(|c| has_column::<E>(c))
        .collect()
}

/// Whether a payload may write `column` (known and not server-assigned).
pub fn is_writable<E: EntityKind>(column: &str) -> bool {
    has_column::<E>(column) && !SERVER_ASSIGNED_COLUMNS.contains(&column)
}
