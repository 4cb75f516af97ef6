/**
 * Logout and Cookie-Clear Handlers
 *
 * Both handlers delete the `access_token` cookie, including the
 * domain-scoped variant when a shared cookie domain is configured, since a
 * delete only reaches the browser cookie it exactly matches.
 */

use axum::{
    extract::State,
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::sessions::clear_access_cookies;
use crate::server::state::AppState;

/// Logout handler
///
/// Clears the session cookie and sends the browser back to the login page.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = clear_access_cookies(jar, &state.settings);
    (jar, Redirect::to("/auth/login"))
}

/// Cookie-clear helper
///
/// Debug endpoint: clears the cookie without redirecting.
pub async fn clear_cookie(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Html<&'static str>) {
    let jar = clear_access_cookies(jar, &state.settings);
    (jar, Html("ok"))
}
