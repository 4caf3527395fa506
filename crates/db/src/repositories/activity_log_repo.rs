//! Repository for the append-only `activity_logs` table.

use async_trait::async_trait;
use sqlx::types::Json;

use crate::error::StoreError;
use crate::models::activity::NewActivity;
use crate::store::ActivityLog;
use crate::DbPool;

/// Column list for INSERT (excludes auto-generated `id`, `created_at`).
const INSERT_COLUMNS: &str = "actor_id, action, entity_type, entity_id, details";

#[derive(Debug, Clone)]
pub struct ActivityLogRepo {
    pool: DbPool,
}

impl ActivityLogRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLog for ActivityLogRepo {
    async fn append(&self, entry: &NewActivity) -> Result<(), StoreError> {
        let query = format!("INSERT INTO activity_logs ({INSERT_COLUMNS}) VALUES ($1, $2, $3, $4, $5)");
        sqlx::query(&query)
            .bind(&entry.actor_id)
            .bind(&entry.action)
            .bind(&entry.entity_type)
            .bind(entry.entity_id.as_deref())
            .bind(Json(&entry.details))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
