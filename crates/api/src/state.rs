use std::sync::Arc;

use atelier_core::entity::EntityKind;
use atelier_db::store::{AdminDirectory, RecordReader, RecordWriter};

use crate::config::ServerConfig;
use crate::service::activity::ActivityRecorder;
use crate::service::search::PublicSearch;
use crate::service::EntityService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Elevated store used by admin routes.
    pub records: Arc<dyn RecordWriter>,
    /// Restricted, read-only store used by public routes.
    pub public_records: Arc<dyn RecordReader>,
    /// Admin profile lookups for the access check.
    pub admins: Arc<dyn AdminDirectory>,
    /// Best-effort activity trail.
    pub activity: ActivityRecorder,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// The entity service bound to kind `E`.
    pub fn service<E: EntityKind>(&self) -> EntityService<E> {
        EntityService::new(
            Arc::clone(&self.records),
            Arc::clone(&self.admins),
            self.activity.clone(),
        )
    }

    /// Aggregate search over published content.
    pub fn public_search(&self) -> PublicSearch {
        PublicSearch::new(Arc::clone(&self.public_records))
    }
}
