//! Repository for the `admin_profiles` table as seen by the access check.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::admin_profile::AdminProfile;
use crate::store::AdminDirectory;
use crate::DbPool;

/// Column list for `admin_profiles` SELECT queries.
const COLUMNS: &str = "\
    id::text AS id, user_id, email, full_name, role, \
    is_active, created_at, updated_at";

/// Looks up admin profiles by identity-provider user id.
#[derive(Debug, Clone)]
pub struct AdminProfileRepo {
    pool: DbPool,
}

impl AdminProfileRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminDirectory for AdminProfileRepo {
    async fn find_active_profile(&self, user_id: &str) -> Result<Option<AdminProfile>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM admin_profiles \
             WHERE user_id = $1 AND is_active = true \
             LIMIT 1"
        );
        let profile = sqlx::query_as::<_, AdminProfile>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }
}
