/**
 * Emergency Admin Bootstrap Handler
 *
 * POST /auth/_force_admin_reset?secret=...
 *
 * Creates or resets the admin account from environment configuration
 * (`ADMIN_EMAIL`, `ADMIN_PASS`, `ADMIN_NAME`). Intended for recovering a
 * deployment whose admin credentials were lost; guarded by
 * `ADMIN_SETUP_SECRET` (falling back to `SECRET_KEY`).
 */

use axum::{
    extract::{Query, State},
    response::Json,
};
use bcrypt::{hash, DEFAULT_COST};

use crate::auth::handlers::types::AdminResetQuery;
use crate::auth::users::{create_user, find_user_by_email, normalize_email, update_admin_user};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Admin reset handler
///
/// # Arguments
///
/// * `State(state)` - Application state (pool + settings)
/// * `Query(query)` - Carries the setup secret
///
/// # Returns
///
/// `{ok, admin, action: "created"|"updated"}`
///
/// # Errors
///
/// * `403 Forbidden` - secret missing or mismatched
/// * `400 Bad Request` - `ADMIN_EMAIL` or `ADMIN_PASS` not configured
/// * `503 Service Unavailable` - database not configured
pub async fn force_admin_reset(
    State(state): State<AppState>,
    Query(query): Query<AdminResetQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let setup_secret = state.settings.admin_reset_secret();
    if setup_secret.is_empty() || query.secret != setup_secret {
        tracing::warn!("Admin reset rejected: bad secret");
        return Err(ApiError::Forbidden);
    }

    let pool = state.db_pool.as_ref().ok_or_else(|| {
        tracing::error!("Database not configured");
        ApiError::DatabaseUnavailable
    })?;

    let email = state
        .settings
        .admin_email
        .as_deref()
        .map(normalize_email)
        .unwrap_or_default();
    let password = state.settings.admin_pass.clone().unwrap_or_default();
    let name = state.settings.admin_name.clone();

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::validation("ADMIN_EMAIL or ADMIN_PASS missing"));
    }

    let password_hash = hash(&password, DEFAULT_COST)?;

    let action = match find_user_by_email(pool, &email).await? {
        Some(user) => {
            update_admin_user(pool, user.id, &password_hash, &name).await?;
            "updated"
        }
        None => {
            create_user(pool, &email, &name, &password_hash).await?;
            "created"
        }
    };

    tracing::info!("Admin account {}: {}", action, email);

    Ok(Json(serde_json::json!({
        "ok": true,
        "admin": email,
        "action": action,
    })))
}
