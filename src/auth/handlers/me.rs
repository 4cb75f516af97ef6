/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /auth/me, which returns
 * information about the currently authenticated user.
 *
 * # Authentication
 *
 * Resolution is dual-mode via the `CurrentUser` extractor: the
 * `access_token` cookie is tried first, then the `Authorization: Bearer`
 * header. Either works; neither means 401.
 */

use axum::response::Json;

use crate::auth::handlers::types::UserResponse;
use crate::middleware::auth::CurrentUser;

/// Get current user handler
///
/// # Returns
///
/// `{id, email, name, is_pro}` for the resolved user
///
/// # Errors
///
/// * `401 Unauthorized` - no cookie and no bearer token resolved to a user
/// * `503 Service Unavailable` - database not configured
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
