//! CurrentUser Extractor
//!
//! Handlers behind [`require_login`](super::require_login) get the user from
//! request extensions; anywhere else the session is validated on the spot.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::auth::middleware::authenticate;
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Already extracted by middleware
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let user = authenticate(state, &parts.headers, &parts.uri)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

/// `Option<CurrentUser>`: `None` for anonymous or invalid sessions, never rejects
impl OptionalFromRequestParts<ServerState> for CurrentUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(Some(user.clone()));
        }
        if super::session::token_from_headers(&parts.headers).is_none() {
            return Ok(None);
        }
        Ok(authenticate(state, &parts.headers, &parts.uri).ok())
    }
}
