//! Fire-and-forget activity logging.
//!
//! Each append runs on its own detached task after the audited write has
//! completed. Failures are reported through `tracing` only and can never
//! fail or roll back the operation being audited.

use std::sync::Arc;

use atelier_core::activity::redact_sensitive_fields;
use atelier_db::models::activity::NewActivity;
use atelier_db::store::ActivityLog;
use serde_json::Value;

#[derive(Clone)]
pub struct ActivityRecorder {
    log: Arc<dyn ActivityLog>,
}

impl ActivityRecorder {
    pub fn new(log: Arc<dyn ActivityLog>) -> Self {
        Self { log }
    }

    /// Dispatch one append. Returns immediately.
    pub fn record(
        &self,
        actor_id: &str,
        action: &str,
        entity_type: &str,
        entity_id: Option<String>,
        details: Value,
    ) {
        let entry = NewActivity {
            actor_id: actor_id.to_string(),
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
            details: redact_sensitive_fields(&details),
        };
        let log = Arc::clone(&self.log);

        tokio::spawn(async move {
            if let Err(e) = log.append(&entry).await {
                tracing::warn!(
                    error = %e,
                    action = %entry.action,
                    entity_type = %entry.entity_type,
                    entity_id = ?entry.entity_id,
                    "Failed to record activity"
                );
            }
        });
    }
}
