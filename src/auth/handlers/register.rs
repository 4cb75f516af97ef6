/**
 * Registration Handler
 *
 * This module implements the user registration handler for
 * POST /auth/register.
 *
 * # Registration Process
 *
 * 1. Normalize the email (trim + lowercase)
 * 2. Validate email shape and password length
 * 3. Check that no user exists under that email, case-insensitively
 * 4. Hash the password using bcrypt
 * 5. Create the user and return it (201)
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with DEFAULT_COST
 * - Passwords are never returned in responses
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::auth::users::{create_user, find_user_by_email, normalize_email};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Registration handler
///
/// # Arguments
///
/// * `State(state)` - Application state (pool + settings)
/// * `Json(request)` - Registration request containing email, name, password
///
/// # Returns
///
/// `201 Created` with the new user (no hash), or an error
///
/// # Errors
///
/// * `400 Bad Request` - invalid email/password, or email already registered
/// * `503 Service Unavailable` - database not configured
/// * `500 Internal Server Error` - hashing or insert failure
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let pool = state.db_pool.as_ref().ok_or_else(|| {
        tracing::error!("Database not configured");
        ApiError::DatabaseUnavailable
    })?;

    let email = normalize_email(&request.email);
    tracing::info!("Registration request for email: {}", email);

    if !email.contains('@') {
        tracing::warn!("Invalid email format: {}", email);
        return Err(ApiError::validation("Invalid email format"));
    }

    if request.password.len() < 8 {
        tracing::warn!("Password too short");
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }

    if find_user_by_email(pool, &email).await?.is_some() {
        tracing::warn!("Email already registered: {}", email);
        return Err(ApiError::EmailTaken);
    }

    let password_hash = hash(&request.password, DEFAULT_COST)?;

    let user = create_user(pool, &email, &request.name, &password_hash).await?;

    tracing::info!("User created successfully: {}", user.email);

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
