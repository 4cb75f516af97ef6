/**
 * Login Handlers
 *
 * Three entry points share the same credential check:
 *
 * - `POST /auth/login` - JSON API, answers a bearer token
 * - `GET /auth/login` - static HTML form for browsers
 * - `POST /auth/login/web` - form target, sets the HTTP-only cookie and
 *   redirects to the dashboard
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - Unknown email and wrong password return the same 401 (no enumeration)
 * - The web flow stores the token in an HTTP-only cookie, so scripts never
 *   see it
 */

use axum::{
    extract::State,
    response::{Html, Json, Redirect},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use bcrypt::verify;
use sqlx::PgPool;

use crate::auth::handlers::types::{LoginForm, LoginRequest, TokenResponse};
use crate::auth::sessions::{access_cookie, create_token};
use crate::auth::users::{find_user_by_email, User};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Look up a user by email and verify the password
///
/// Both failure modes collapse into `InvalidCredentials` so responses do
/// not reveal whether the email exists.
async fn authenticate(pool: &PgPool, email: &str, password: &str) -> Result<User, ApiError> {
    let user = find_user_by_email(pool, email).await?.ok_or_else(|| {
        tracing::warn!("Login failed, unknown email: {}", email);
        ApiError::InvalidCredentials
    })?;

    let valid = verify(password, &user.password_hash)?;
    if !valid {
        tracing::warn!("Login failed, wrong password for: {}", user.email);
        return Err(ApiError::InvalidCredentials);
    }

    Ok(user)
}

/// JSON login handler
///
/// # Arguments
///
/// * `State(state)` - Application state (pool + settings)
/// * `Json(request)` - Login request containing email and password
///
/// # Returns
///
/// `{access_token, token_type: "bearer"}` or an error
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password
/// * `503 Service Unavailable` - database not configured
/// * `500 Internal Server Error` - query, verify or token failure
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let pool = state.db_pool.as_ref().ok_or_else(|| {
        tracing::error!("Database not configured");
        ApiError::DatabaseUnavailable
    })?;

    tracing::info!("Login request for: {}", request.email);

    let user = authenticate(pool, &request.email, &request.password).await?;

    let token = create_token(&user.email, &state.settings)?;

    tracing::info!("User logged in successfully: {}", user.email);

    Ok(Json(TokenResponse::bearer(token)))
}

/// Login page for browsers
///
/// A deliberately tiny inline form; the real frontend lives elsewhere.
pub async fn login_page() -> Html<&'static str> {
    Html(
        r#"<!doctype html><meta charset="utf-8">
<title>AlertTrail - Sign in</title>
<link rel="stylesheet" href="/static/styles.css">
<div class="card">
  <h1>Sign in</h1>
  <form method="post" action="/auth/login/web">
    <input name="email" type="email" placeholder="Email" required>
    <input name="password" type="password" placeholder="Password" required>
    <button>Sign in</button>
  </form>
  <p><a href="/">Back</a></p>
</div>"#,
    )
}

/// Web login handler (form target)
///
/// Same credential check as the JSON login; on success the token is issued
/// as the HTTP-only `access_token` cookie and the browser is redirected to
/// the dashboard.
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password
/// * `503 Service Unavailable` - database not configured
pub async fn login_web(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let pool = state.db_pool.as_ref().ok_or_else(|| {
        tracing::error!("Database not configured");
        ApiError::DatabaseUnavailable
    })?;

    let user = authenticate(pool, &form.email, &form.password).await?;

    let token = create_token(&user.email, &state.settings)?;
    let jar = jar.add(access_cookie(token, &state.settings));

    tracing::info!("Web login, cookie issued for: {}", user.email);

    Ok((jar, Redirect::to("/dashboard")))
}
