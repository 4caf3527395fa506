//! In-memory implementations of the storage collaborators.
//!
//! Semantics follow the Postgres store closely enough for service tests:
//! slugs are unique per table, updates merge keys, sorting is stable with
//! nulls last and ties in insertion order. Failure injection switches let
//! tests force write or activity-log errors.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::time::Duration;

use async_trait::async_trait;
use atelier_core::entity::EntityKind;
use atelier_core::query::{FilterValue, ListQuery, SortOrder};
use atelier_core::types::Row;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::{Notify, RwLock};

use crate::error::StoreError;
use crate::models::activity::NewActivity;
use crate::models::admin_profile::{AdminProfile, AdminUsers};
use crate::store::{ActivityLog, AdminDirectory, RecordReader, RecordWriter};

// ---------------------------------------------------------------------------
// Record store
// ---------------------------------------------------------------------------

/// Tables held as insertion-ordered row vectors.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with [`StoreError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, AtomicOrdering::SeqCst);
    }

    /// Number of write calls that reached the store, including failed ones.
    pub fn write_count(&self) -> usize {
        self.writes.load(AtomicOrdering::SeqCst)
    }

    /// Number of rows currently in `table`.
    pub async fn row_count(&self, table: &str) -> usize {
        self.tables.read().await.get(table).map_or(0, Vec::len)
    }

    fn begin_write(&self) -> Result<(), StoreError> {
        self.writes.fetch_add(1, AtomicOrdering::SeqCst);
        if self.fail_writes.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        Ok(())
    }
}

fn slug_constraint(table: &str) -> StoreError {
    StoreError::UniqueViolation {
        constraint: format!("uq_{table}_slug"),
    }
}

fn id_of(row: &Row) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

/// Copy of `row` restricted to `columns`, in column order.
fn project(row: &Row, columns: &[&str]) -> Row {
    columns
        .iter()
        .filter_map(|c| row.get(*c).map(|v| ((*c).to_string(), v.clone())))
        .collect()
}

/// Text form of a value as Postgres' `::text` cast would render it.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn matches_query(row: &Row, query: &ListQuery) -> bool {
    let search_ok = query.search.as_ref().map_or(true, |search| {
        search
            .columns
            .iter()
            .filter_map(|c| row.get(c).and_then(as_text))
            .any(|text| search.matches(&text))
    });

    search_ok
        && query.filters.iter().all(|f| {
            let value = row.get(&f.column);
            match &f.value {
                FilterValue::Bool(b) => value == Some(&Value::Bool(*b)),
                FilterValue::Text(t) => value.and_then(as_text).as_deref() == Some(t.as_str()),
            }
        })
}

/// Rank used to order values of different JSON types deterministically.
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Array(_) => 3,
        Value::Object(_) => 4,
        Value::Null => 5,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Nulls (and missing keys) sort last in both directions.
fn compare_rows(a: &Row, b: &Row, column: &str, order: SortOrder) -> Ordering {
    let a = a.get(column).filter(|v| !v.is_null());
    let b = b.get(column).filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => match order {
            SortOrder::Asc => compare_values(x, y),
            SortOrder::Desc => compare_values(y, x),
        },
    }
}

fn slug_taken(rows: &[Row], slug: &Value, exclude_id: Option<&str>) -> bool {
    !slug.is_null()
        && rows.iter().any(|r| {
            r.get("slug") == Some(slug) && (exclude_id.is_none() || id_of(r) != exclude_id)
        })
}

#[async_trait]
impl RecordReader for MemoryRecordStore {
    async fn select_page(
        &self,
        table: &str,
        columns: &[&str],
        query: &ListQuery,
    ) -> Result<(Vec<Row>, u64), StoreError> {
        let tables = self.tables.read().await;
        let mut matched: Vec<&Row> = tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| matches_query(r, query)).collect())
            .unwrap_or_default();

        matched.sort_by(|a, b| compare_rows(a, b, &query.sort.column, query.sort.order));

        let total = matched.len() as u64;
        let offset = usize::try_from(query.window.offset()).unwrap_or(usize::MAX);
        let page = matched
            .into_iter()
            .skip(offset)
            .take(query.window.limit as usize)
            .map(|r| project(r, columns))
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(
        &self,
        table: &str,
        columns: &[&str],
        id: &str,
    ) -> Result<Option<Row>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .and_then(|rows| rows.iter().find(|r| id_of(r) == Some(id)))
            .map(|r| project(r, columns)))
    }

    async fn slug_exists(
        &self,
        table: &str,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        let slug = Value::String(slug.to_string());
        Ok(tables
            .get(table)
            .is_some_and(|rows| slug_taken(rows, &slug, exclude_id)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl RecordWriter for MemoryRecordStore {
    async fn insert(&self, table: &str, columns: &[&str], data: &Row) -> Result<Row, StoreError> {
        self.begin_write()?;
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();

        if let Some(slug) = data.get("slug") {
            if slug_taken(rows, slug, None) {
                return Err(slug_constraint(table));
            }
        }

        let now = Value::String(Utc::now().to_rfc3339());
        let mut row = data.clone();
        row.entry("id")
            .or_insert_with(|| Value::String(uuid::Uuid::new_v4().to_string()));
        row.entry("created_at").or_insert_with(|| now.clone());
        row.entry("updated_at").or_insert(now);

        let stored = project(&row, columns);
        rows.push(row);
        Ok(stored)
    }

    async fn update(
        &self,
        table: &str,
        columns: &[&str],
        id: &str,
        data: &Row,
    ) -> Result<Option<Row>, StoreError> {
        self.begin_write()?;
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(None);
        };

        if let Some(slug) = data.get("slug") {
            if slug_taken(rows, slug, Some(id)) {
                return Err(slug_constraint(table));
            }
        }

        let Some(row) = rows.iter_mut().find(|r| id_of(r) == Some(id)) else {
            return Ok(None);
        };
        for (key, value) in data {
            row.insert(key.clone(), value.clone());
        }
        Ok(Some(project(row, columns)))
    }

    async fn delete(&self, table: &str, id: &str) -> Result<bool, StoreError> {
        self.begin_write()?;
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|r| id_of(r) != Some(id));
        Ok(rows.len() < before)
    }
}

/// Admin lookups read the store's own `admin_profiles` table, so a profile
/// created through the users route can immediately authorize requests.
#[async_trait]
impl AdminDirectory for MemoryRecordStore {
    async fn find_active_profile(&self, user_id: &str) -> Result<Option<AdminProfile>, StoreError> {
        let tables = self.tables.read().await;
        let Some(rows) = tables.get(AdminUsers::TABLE) else {
            return Ok(None);
        };
        let found = rows.iter().find(|r| {
            r.get("user_id").and_then(Value::as_str) == Some(user_id)
                && r.get("is_active") == Some(&Value::Bool(true))
        });
        match found {
            Some(row) => Ok(Some(serde_json::from_value(Value::Object(row.clone()))?)),
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Activity log
// ---------------------------------------------------------------------------

/// Activity log that keeps entries in memory and can be told to fail.
#[derive(Debug, Default)]
pub struct MemoryActivityLog {
    entries: tokio::sync::Mutex<Vec<NewActivity>>,
    fail: AtomicBool,
    attempts: AtomicUsize,
    appended: Notify,
}

impl MemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent append fail.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, AtomicOrdering::SeqCst);
    }

    /// Snapshot of the stored entries, oldest first.
    pub async fn entries(&self) -> Vec<NewActivity> {
        self.entries.lock().await.clone()
    }

    /// Number of append calls, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(AtomicOrdering::SeqCst)
    }

    /// Wait until at least `count` appends have been attempted, or until
    /// `timeout` elapses. Returns whether the count was reached.
    ///
    /// Appends run on detached tasks, so tests use this to observe them.
    pub async fn wait_for_attempts(&self, count: usize, timeout: Duration) -> bool {
        let wait = async {
            loop {
                let notified = self.appended.notified();
                if self.attempts() >= count {
                    return;
                }
                notified.await;
            }
        };
        tokio::time::timeout(timeout, wait).await.is_ok()
    }
}

#[async_trait]
impl ActivityLog for MemoryActivityLog {
    async fn append(&self, entry: &NewActivity) -> Result<(), StoreError> {
        let result = if self.fail.load(AtomicOrdering::SeqCst) {
            Err(StoreError::Unavailable("activity log disabled".into()))
        } else {
            self.entries.lock().await.push(entry.clone());
            Ok(())
        };
        self.attempts.fetch_add(1, AtomicOrdering::SeqCst);
        self.appended.notify_waiters();
        result
    }
}
