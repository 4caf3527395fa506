//! Record shapes for every managed table and their entity-kind bindings.

pub mod activity;
pub mod admin_profile;
pub mod explore;
pub mod partner;
pub mod project;
pub mod service;
pub mod team_member;

pub use admin_profile::{AdminProfile, AdminUsers};
pub use explore::{ExploreContent, ExploreItem};
pub use partner::{Partner, Partners};
pub use project::{Project, Projects};
pub use service::{Service, Services};
pub use team_member::{Team, TeamMember};
