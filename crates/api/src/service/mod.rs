//! The generic entity service.
//!
//! One engine serves every managed table: [`EntityService<E>`] is bound to an
//! [`EntityKind`] and gets its table, labels, record shape and field rules
//! from the kind's associated constants. Every operation runs the access
//! check first; mutations dispatch an activity-log append after the write.
//! Store failures are logged here and replaced with generic messages.

pub mod access;
pub mod activity;
pub mod search;

use std::marker::PhantomData;
use std::sync::Arc;

use atelier_core::activity::{
    actions, create_details, delete_details, display_label, update_details,
};
use atelier_core::entity::{
    check_columns, has_slug, is_writable, lookup_columns, EntityKind, SERVER_ASSIGNED_COLUMNS,
};
use atelier_core::error::CoreError;
use atelier_core::query::{ListParams, ListQuery, Page, Pagination};
use atelier_core::types::{DbId, Row};
use atelier_core::validation::require_fields;
use atelier_db::error::StoreError;
use atelier_db::store::{AdminDirectory, RecordReader, RecordWriter};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use self::access::{verify_access, AdminContext};
use self::activity::ActivityRecorder;
use crate::auth::session::Session;

/// What a successful delete reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub id: DbId,
    pub name: Option<String>,
}

pub struct EntityService<E: EntityKind> {
    store: Arc<dyn RecordWriter>,
    admins: Arc<dyn AdminDirectory>,
    activity: ActivityRecorder,
    _kind: PhantomData<E>,
}

impl<E: EntityKind> EntityService<E> {
    pub fn new(
        store: Arc<dyn RecordWriter>,
        admins: Arc<dyn AdminDirectory>,
        activity: ActivityRecorder,
    ) -> Self {
        Self {
            store,
            admins,
            activity,
            _kind: PhantomData,
        }
    }

    async fn authorize(&self, session: Option<&Session>) -> Result<AdminContext, CoreError> {
        verify_access(self.admins.as_ref(), session).await
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// One page of records matching the search term and filters.
    pub async fn list(
        &self,
        session: Option<&Session>,
        params: &ListParams,
    ) -> Result<Page<E::Record>, CoreError> {
        self.authorize(session).await?;

        let query = if params.search_fields.is_empty() {
            ListQuery::build(params, E::SEARCH_FIELDS, E::DEFAULT_SORT)
        } else {
            ListQuery::build(params, params.search_fields.as_slice(), E::DEFAULT_SORT)
        };
        check_columns::<E>(query.columns())?;

        let (rows, total) = self
            .store
            .select_page(E::TABLE, E::COLUMNS, &query)
            .await
            .map_err(|e| self.store_failure(e, "fetch"))?;

        let data = rows
            .into_iter()
            .map(decode::<E>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.store_failure(e, "fetch"))?;

        Ok(Page {
            data,
            pagination: Pagination::new(query.window, total),
        })
    }

    /// A single record. Any lookup failure reads as not found.
    pub async fn get_by_id(
        &self,
        session: Option<&Session>,
        id: &str,
    ) -> Result<E::Record, CoreError> {
        self.authorize(session).await?;

        let row = self.find_existing(id, E::COLUMNS).await?;
        decode::<E>(row).map_err(|e| {
            tracing::error!(entity = E::TABLE, %id, error = %e, "Stored row does not match record shape");
            self.not_found(id)
        })
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Validate and insert a new record.
    pub async fn create(
        &self,
        session: Option<&Session>,
        data: Row,
    ) -> Result<E::Record, CoreError> {
        let ctx = self.authorize(session).await?;

        check_columns::<E>(data.keys().map(String::as_str))?;
        let data: Row = data
            .into_iter()
            .filter(|(k, _)| !SERVER_ASSIGNED_COLUMNS.contains(&k.as_str()))
            .collect();
        require_fields(&data, E::REQUIRED_FIELDS)?;

        if let Some(slug) = slug_of(&data) {
            self.ensure_slug_free(slug, None, "create").await?;
        }

        let row = self
            .store
            .insert(E::TABLE, E::COLUMNS, &data)
            .await
            .map_err(|e| self.write_failure(e, "create"))?;

        let entity_id = row.get("id").and_then(Value::as_str).map(str::to_string);
        let record = decode::<E>(row).map_err(|e| self.store_failure(e, "create"))?;

        let label = display_label(&data, E::LABEL_FIELDS);
        self.activity.record(
            ctx.actor_id(),
            actions::CREATE,
            E::TABLE,
            entity_id,
            create_details(label.as_deref()),
        );

        Ok(record)
    }

    /// Apply the permitted keys of `data` to record `id`.
    pub async fn update(
        &self,
        session: Option<&Session>,
        id: &str,
        data: Row,
    ) -> Result<E::Record, CoreError> {
        let ctx = self.authorize(session).await?;

        let existing = self.find_existing(id, &lookup_columns::<E>()).await?;
        let mut payload = update_payload::<E>(data)?;

        if let Some(slug) = slug_of(&payload) {
            let current = existing.get("slug").and_then(Value::as_str);
            if current != Some(slug) {
                self.ensure_slug_free(slug, Some(id), "update").await?;
            }
        }

        payload.insert(
            "updated_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        let changed_fields: Vec<String> = payload.keys().cloned().collect();

        let row = self
            .store
            .update(E::TABLE, E::COLUMNS, id, &payload)
            .await
            .map_err(|e| self.write_failure(e, "update"))?
            .ok_or_else(|| self.not_found(id))?;

        let label = display_label(&row, E::LABEL_FIELDS)
            .or_else(|| display_label(&existing, E::LABEL_FIELDS));
        let record = decode::<E>(row).map_err(|e| self.store_failure(e, "update"))?;

        self.activity.record(
            ctx.actor_id(),
            actions::UPDATE,
            E::TABLE,
            Some(id.to_string()),
            update_details(label.as_deref(), &changed_fields),
        );

        Ok(record)
    }

    /// Hard-delete record `id`. A second delete of the same id is not found.
    pub async fn delete(&self, session: Option<&Session>, id: &str) -> Result<Deleted, CoreError> {
        let ctx = self.authorize(session).await?;

        let existing = self.find_existing(id, &lookup_columns::<E>()).await?;

        let removed = self
            .store
            .delete(E::TABLE, id)
            .await
            .map_err(|e| self.store_failure(e, "delete"))?;
        if !removed {
            return Err(self.not_found(id));
        }

        let label = display_label(&existing, E::LABEL_FIELDS);
        self.activity.record(
            ctx.actor_id(),
            actions::DELETE,
            E::TABLE,
            Some(id.to_string()),
            delete_details(label.as_deref()),
        );

        Ok(Deleted {
            id: id.to_string(),
            name: label,
        })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn find_existing(&self, id: &str, columns: &[&str]) -> Result<Row, CoreError> {
        match self.store.find_by_id(E::TABLE, columns, id).await {
            Ok(Some(row)) => Ok(row),
            Ok(None) => Err(self.not_found(id)),
            Err(e) => {
                tracing::error!(entity = E::TABLE, %id, error = %e, "Record lookup failed");
                Err(self.not_found(id))
            }
        }
    }

    /// Fast-path duplicate check. The unique index still guards the write.
    async fn ensure_slug_free(
        &self,
        slug: &str,
        exclude_id: Option<&str>,
        verb: &str,
    ) -> Result<(), CoreError> {
        if !has_slug::<E>() {
            return Ok(());
        }
        let taken = self
            .store
            .slug_exists(E::TABLE, slug, exclude_id)
            .await
            .map_err(|e| self.store_failure(e, verb))?;
        if taken {
            return Err(CoreError::duplicate_slug(E::LABEL));
        }
        Ok(())
    }

    fn not_found(&self, id: &str) -> CoreError {
        CoreError::NotFound {
            entity: E::DISPLAY_NAME,
            id: id.to_string(),
        }
    }

    /// Unique violations on the write itself surface as conflicts.
    fn write_failure(&self, err: StoreError, verb: &str) -> CoreError {
        match err {
            StoreError::UniqueViolation { constraint } if constraint.ends_with("_slug") => {
                CoreError::duplicate_slug(E::LABEL)
            }
            StoreError::UniqueViolation { constraint } => {
                tracing::debug!(entity = E::TABLE, %constraint, "Unique constraint rejected write");
                CoreError::Conflict(format!("A {} with these details already exists", E::LABEL))
            }
            other => self.store_failure(other, verb),
        }
    }

    /// Log the cause and return the generic per-operation message.
    fn store_failure(&self, err: impl std::fmt::Display, verb: &str) -> CoreError {
        tracing::error!(entity = E::TABLE, operation = verb, error = %err, "Store operation failed");
        let noun = if verb == "fetch" { E::PLURAL } else { E::LABEL };
        CoreError::failed(verb, noun)
    }
}

/// Non-empty string slug in a payload, if any.
fn slug_of(data: &Row) -> Option<&str> {
    data.get("slug").and_then(Value::as_str)
}

/// Build the update payload from caller data.
///
/// With an allow-list only listed keys are copied and anything else is
/// ignored. Without one every writable column passes through, unknown keys
/// are rejected and server-assigned keys are dropped.
fn update_payload<E: EntityKind>(data: Row) -> Result<Row, CoreError> {
    if !E::UPDATABLE_FIELDS.is_empty() {
        return Ok(data
            .into_iter()
            .filter(|(k, _)| E::UPDATABLE_FIELDS.contains(&k.as_str()))
            .collect());
    }

    check_columns::<E>(data.keys().map(String::as_str))?;
    Ok(data
        .into_iter()
        .filter(|(k, _)| is_writable::<E>(k))
        .collect())
}

fn decode<E: EntityKind>(row: Row) -> Result<E::Record, serde_json::Error> {
    serde_json::from_value(Value::Object(row))
}
