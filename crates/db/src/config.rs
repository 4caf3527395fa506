use crate::capability::{Credential, Elevated, Restricted};

/// Default pool size per credential tier.
const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Store configuration loaded from environment variables.
///
/// Built once at startup and passed explicitly to the stores; nothing reads
/// credentials from the environment after this point.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Credential for admin reads and writes.
    pub elevated: Credential<Elevated>,
    /// Credential for public, read-only queries.
    pub restricted: Credential<Restricted>,
    /// Maximum pool size for each tier.
    pub max_connections: u32,
}

impl StoreConfig {
    /// Load store configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default          |
    /// |----------------------------|----------|------------------|
    /// | `DATABASE_URL`             | **yes**  | --               |
    /// | `DATABASE_PUBLIC_URL`      | no       | `DATABASE_URL`   |
    /// | `DATABASE_MAX_CONNECTIONS` | no       | `20`             |
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is not set or `DATABASE_MAX_CONNECTIONS` is
    /// not a valid `u32`.
    pub fn from_env() -> Self {
        let elevated_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in the environment");

        let restricted_url = match std::env::var("DATABASE_PUBLIC_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => {
                tracing::warn!(
                    "DATABASE_PUBLIC_URL not set; public reads will use the elevated credential"
                );
                elevated_url.clone()
            }
        };

        let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| DEFAULT_MAX_CONNECTIONS.to_string())
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        Self {
            elevated: Credential::new(elevated_url),
            restricted: Credential::new(restricted_url),
            max_connections,
        }
    }
}
