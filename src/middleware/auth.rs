/**
 * Authentication Resolution
 *
 * This module provides the extractors protecting routes that require a
 * user. Resolution is dual-mode, in this order:
 *
 * 1. the HTTP-only `access_token` cookie (browser sessions)
 * 2. the `Authorization: Bearer <token>` header (API clients)
 *
 * Whichever decodes first has its subject claim resolved to a User row by
 * case-insensitive email match; the first match wins. If neither path
 * yields a user the request is rejected with 401. Decode failures are not
 * errors, they just mean that path did not authenticate.
 *
 * The database pool is only consulted once a token actually decodes, so a
 * request with no usable credential is 401 even when the server runs
 * without a database.
 */

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::sessions::{verify_token, ACCESS_TOKEN_COOKIE};
use crate::auth::users::{find_user_by_email, User};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Extract the bearer token from the Authorization header, if any
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Axum extractor for the authenticated user
///
/// Use as a handler parameter to require authentication:
///
/// ```ignore
/// async fn handler(CurrentUser(user): CurrentUser) { /* ... */ }
/// ```
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie_token = jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string());
        let header_token = bearer_token(&parts.headers).map(str::to_string);

        // Cookie first, bearer fallback
        for token in [cookie_token, header_token].into_iter().flatten() {
            let claims = match verify_token(&token, &state.settings) {
                Ok(claims) => claims,
                Err(e) => {
                    // A token that does not verify just means this path
                    // did not authenticate
                    tracing::debug!("Token did not verify: {:?}", e);
                    continue;
                }
            };

            let pool = state.db_pool.as_ref().ok_or(ApiError::DatabaseUnavailable)?;
            if let Some(user) = find_user_by_email(pool, &claims.sub).await? {
                return Ok(CurrentUser(user));
            }
        }

        // Neither path authenticated
        tracing::warn!("Request rejected: no usable credential");
        Err(ApiError::Unauthorized)
    }
}

/// Axum extractor for routes where authentication is optional
///
/// Resolves exactly like `CurrentUser` but never rejects: any failure,
/// including a missing database, becomes `None`.
#[derive(Clone, Debug)]
pub struct OptionalUser(pub Option<User>);

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state)
            .await
            .map(|CurrentUser(user)| user)
            .ok();
        Ok(OptionalUser(user))
    }
}
