//! Domain building blocks for the atelier content backend.
//!
//! Nothing in this crate performs IO: it holds the error taxonomy, the
//! entity-kind contract every managed table implements, and the pure
//! query-construction helpers shared by the stores and the service layer.

pub mod activity;
pub mod entity;
pub mod error;
pub mod query;
pub mod search;
pub mod types;
pub mod validation;
