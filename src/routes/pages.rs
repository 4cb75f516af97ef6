/**
 * Root, Health and Dashboard Handlers
 *
 * Thin handlers for everything that isn't the JSON API: the service
 * banner, the health probe, and the browser dashboard behind the cookie
 * session.
 */

use axum::response::{Html, IntoResponse, Json, Redirect, Response};

use crate::middleware::auth::OptionalUser;

/// Service banner
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "name": "AlertTrail API", "status": "ok" }))
}

/// Health probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Browser dashboard
///
/// Anonymous visitors are sent to the login page; authenticated ones get a
/// small page greeting them. The cookie set by `/auth/login/web` is what
/// authenticates the browser here.
pub async fn dashboard(OptionalUser(user): OptionalUser) -> Response {
    let Some(user) = user else {
        return Redirect::to("/auth/login").into_response();
    };

    let who = if user.name.is_empty() {
        user.email.as_str()
    } else {
        user.name.as_str()
    };

    Html(format!(
        r#"<!doctype html><meta charset="utf-8">
<title>AlertTrail - Dashboard</title>
<link rel="stylesheet" href="/static/styles.css">
<div class="card">
  <h1>Welcome, {who}</h1>
  <p>Plan: {plan}</p>
  <p><a href="/analysis">Your analyses</a> &middot; <a href="/auth/logout">Sign out</a></p>
</div>"#,
        plan = if user.is_pro { "Pro" } else { "Free" },
    ))
    .into_response()
}
