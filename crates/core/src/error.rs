use crate::types::DbId;

/// Message shared by both access-denial variants. Callers distinguish them by
/// status code only.
pub const ACCESS_DENIED_MESSAGE: &str = "Unauthorized";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    /// A store operation failed. The message is generic and safe to return;
    /// the underlying cause has already been logged.
    #[error("{0}")]
    Failed(String),
}

impl CoreError {
    /// No active session.
    pub fn unauthorized() -> Self {
        Self::Unauthorized(ACCESS_DENIED_MESSAGE.into())
    }

    /// A session exists but no active admin profile backs it.
    pub fn forbidden() -> Self {
        Self::Forbidden(ACCESS_DENIED_MESSAGE.into())
    }

    /// Aggregated validation error naming every missing field.
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::Validation(format!("Missing required fields: {}", fields.join(", ")))
    }

    pub fn duplicate_slug(label: &str) -> Self {
        Self::Conflict(format!("A {label} with this slug already exists"))
    }

    /// Generic per-operation store failure, e.g. `Failed to update project`.
    pub fn failed(verb: &str, noun: &str) -> Self {
        Self::Failed(format!("Failed to {verb} {noun}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_uses_display_name_only() {
        let err = CoreError::NotFound {
            entity: "Project",
            id: "abc".into(),
        };
        assert_eq!(err.to_string(), "Project not found");
    }

    #[test]
    fn access_denials_share_message() {
        assert_eq!(CoreError::unauthorized().to_string(), "Unauthorized");
        assert_eq!(CoreError::forbidden().to_string(), "Unauthorized");
    }

    #[test]
    fn missing_fields_lists_every_field() {
        let err = CoreError::missing_fields(&["title", "slug"]);
        assert_eq!(err.to_string(), "Missing required fields: title, slug");
    }

    #[test]
    fn duplicate_slug_names_the_entity() {
        assert_eq!(
            CoreError::duplicate_slug("team member").to_string(),
            "A team member with this slug already exists"
        );
    }

    #[test]
    fn failed_message_is_generic() {
        assert_eq!(
            CoreError::failed("fetch", "projects").to_string(),
            "Failed to fetch projects"
        );
    }
}
