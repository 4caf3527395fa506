//! Storage collaborators consumed by the service layer.
//!
//! The service never talks to a pool directly: it holds trait objects so the
//! same code runs against PostgreSQL in production and the in-memory store in
//! tests. Table and column names passed in here have already been checked
//! against the entity kind.

use async_trait::async_trait;
use atelier_core::query::ListQuery;
use atelier_core::types::Row;

use crate::error::StoreError;
use crate::models::activity::NewActivity;
use crate::models::admin_profile::AdminProfile;

/// Read access to managed tables. Implemented for both credential tiers.
#[async_trait]
pub trait RecordReader: Send + Sync {
    /// One page of rows matching `query`, plus the total match count
    /// ignoring the page window.
    async fn select_page(
        &self,
        table: &str,
        columns: &[&str],
        query: &ListQuery,
    ) -> Result<(Vec<Row>, u64), StoreError>;

    /// Point lookup by id. Ids are opaque strings.
    async fn find_by_id(
        &self,
        table: &str,
        columns: &[&str],
        id: &str,
    ) -> Result<Option<Row>, StoreError>;

    /// Whether a row other than `exclude_id` already carries `slug`.
    async fn slug_exists(
        &self,
        table: &str,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, StoreError>;

    /// Liveness check for the health route.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Write access to managed tables. Only elevated stores implement this.
#[async_trait]
pub trait RecordWriter: RecordReader {
    /// Insert `data` and return the stored row with server-assigned fields.
    async fn insert(&self, table: &str, columns: &[&str], data: &Row) -> Result<Row, StoreError>;

    /// Overwrite the keys in `data` on row `id`. `None` when no row matched.
    async fn update(
        &self,
        table: &str,
        columns: &[&str],
        id: &str,
        data: &Row,
    ) -> Result<Option<Row>, StoreError>;

    /// Hard delete. Returns `false` when no row matched.
    async fn delete(&self, table: &str, id: &str) -> Result<bool, StoreError>;
}

/// Resolves sessions to admin profiles.
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// The active admin profile owned by `user_id`, if any.
    async fn find_active_profile(&self, user_id: &str) -> Result<Option<AdminProfile>, StoreError>;
}

/// Append-only activity trail.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn append(&self, entry: &NewActivity) -> Result<(), StoreError>;
}
