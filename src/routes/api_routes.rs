/**
 * API Route Handlers
 *
 * This module defines the route table for the JSON API:
 *
 * ## Authentication
 * - `POST /auth/register` - user registration
 * - `POST /auth/login` - JSON login (bearer token)
 * - `GET /auth/login` - HTML login form
 * - `POST /auth/login/web` - form login (sets the session cookie)
 * - `GET /auth/logout` - clear cookie and redirect
 * - `GET /auth/clear` - clear cookie (debug helper)
 * - `GET /auth/me` - current user info
 * - `POST /auth/_force_admin_reset` - secret-guarded admin bootstrap
 *
 * ## Analysis
 * - `POST /analysis` - run and store an analysis
 * - `GET /analysis` - list the caller's analyses
 * - `GET /analysis/{id}/pdf` - PDF export
 *
 * ## Webhooks
 * - `POST /webhooks/mpago` - payment notifications
 *
 * # Authentication
 *
 * The analysis routes and `/auth/me` require a session (cookie or bearer,
 * resolved by the `CurrentUser` extractor). Registration, both logins and
 * the webhook are public; the admin reset is guarded by its setup secret.
 */

use axum::routing::{get, post};
use axum::Router;

use crate::analysis::{analysis_pdf, list_my_analyses, run_analysis};
use crate::auth::handlers::{
    clear_cookie, force_admin_reset, login, login_page, login_web, logout, me, register,
};
use crate::server::state::AppState;
use crate::webhooks::mpago_webhook;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/auth/register", post(register))
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/login/web", post(login_web))
        .route("/auth/logout", get(logout))
        .route("/auth/clear", get(clear_cookie))
        .route("/auth/me", get(me))
        .route("/auth/_force_admin_reset", post(force_admin_reset))
        // Analysis endpoints
        .route("/analysis", post(run_analysis).get(list_my_analyses))
        .route("/analysis/{id}/pdf", get(analysis_pdf))
        // Payment webhooks
        .route("/webhooks/mpago", post(mpago_webhook))
}
