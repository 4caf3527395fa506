//! Shared response envelope types for API handlers.
//!
//! Successful responses use a `{ "data": ... }` envelope. List endpoints
//! return [`atelier_core::query::Page`], which adds `pagination`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": ..., "data": T }`, used by delete routes.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub message: String,
    pub data: T,
}
