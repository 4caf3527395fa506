//! The one access policy applied to every admin route.

use atelier_core::error::CoreError;
use atelier_db::models::AdminProfile;
use atelier_db::store::AdminDirectory;

use crate::auth::session::Session;

/// A verified admin caller.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub session: Session,
    /// Fetched for completeness; no operation branches on its role.
    pub profile: AdminProfile,
}

impl AdminContext {
    pub fn actor_id(&self) -> &str {
        &self.session.user_id
    }
}

/// Resolve the caller to an active admin.
///
/// - no session: [`CoreError::Unauthorized`] (401)
/// - session without an active profile, or a failed lookup: [`CoreError::Forbidden`] (403)
pub async fn verify_access(
    directory: &dyn AdminDirectory,
    session: Option<&Session>,
) -> Result<AdminContext, CoreError> {
    let Some(session) = session else {
        tracing::debug!("Access denied: no session");
        return Err(CoreError::unauthorized());
    };

    match directory.find_active_profile(&session.user_id).await {
        Ok(Some(profile)) => Ok(AdminContext {
            session: session.clone(),
            profile,
        }),
        Ok(None) => {
            tracing::debug!(user_id = %session.user_id, "Access denied: no active admin profile");
            Err(CoreError::forbidden())
        }
        Err(e) => {
            tracing::error!(user_id = %session.user_id, error = %e, "Admin profile lookup failed");
            Err(CoreError::forbidden())
        }
    }
}
