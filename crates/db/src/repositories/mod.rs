//! PostgreSQL implementations of the storage collaborators.

pub mod activity_log_repo;
pub mod admin_profile_repo;
pub mod record_repo;
mod sql;

pub use activity_log_repo::ActivityLogRepo;
pub use admin_profile_repo::AdminProfileRepo;
pub use record_repo::PgRecordStore;
