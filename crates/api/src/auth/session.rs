//! Session extraction from the `Authorization` header.
//!
//! Admin routes never reject at the extractor: a missing or invalid token
//! simply yields no session, and the entity service's access check turns
//! that into a 401. This keeps one authorization path for every route.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

use crate::auth::jwt::validate_token;
use crate::state::AppState;

/// An authenticated identity-provider session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Identity-provider user id (`claims.sub`).
    pub user_id: String,
    pub email: Option<String>,
}

/// The caller's session, if the request carried a valid bearer token.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

impl MaybeSession {
    pub fn session(&self) -> Option<&Session> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
        else {
            return Ok(MaybeSession(None));
        };

        let Some(token) = header.strip_prefix("Bearer ") else {
            tracing::debug!("Ignoring non-bearer Authorization header");
            return Ok(MaybeSession(None));
        };

        match validate_token(token, &state.config.jwt) {
            Ok(claims) => Ok(MaybeSession(Some(Session {
                user_id: claims.sub,
                email: claims.email,
            }))),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
                Ok(MaybeSession(None))
            }
        }
    }
}
