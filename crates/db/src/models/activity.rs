use serde::{Deserialize, Serialize};
use serde_json::Value;

/// DTO for appending one activity-log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActivity {
    /// Identity-provider user id of the admin who acted.
    pub actor_id: String,
    pub action: String,
    /// Table of the affected record.
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub details: Value,
}
