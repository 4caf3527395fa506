/// Failure reported by a store implementation.
///
/// Never crosses the service boundary: the service logs it and replaces it
/// with a generic [`atelier_core::error::CoreError`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique index rejected the write.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// A row could not be converted to or from JSON.
    #[error("row decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The store refused the call (used by in-memory failure injection).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    /// PostgreSQL unique violations (SQLSTATE 23505) are lifted into
    /// [`StoreError::UniqueViolation`]; everything else stays opaque.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                return Self::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                };
            }
        }
        Self::Database(err)
    }
}
