/// Primary keys are UUIDs in PostgreSQL but travel as opaque strings above
/// the store; no format validation is performed on them.
pub type DbId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A record as it crosses the store boundary: column name to JSON value.
pub type Row = serde_json::Map<String, serde_json::Value>;
