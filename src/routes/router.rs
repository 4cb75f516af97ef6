/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Page routes (root, health, dashboard)
 * 2. API routes (auth, analysis, webhooks)
 * 3. Static files under /static
 * 4. Fallback handler (404)
 *
 * # CORS
 *
 * The CORS policy is derived from `CORS_ORIGINS`: a literal `*` allows any
 * origin but cannot allow credentials (the cookie flow then only works
 * same-origin); an explicit comma-separated list allows exactly those
 * origins with credentials, which the cookie flow needs cross-origin.
 */

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::routes::api_routes::configure_api_routes;
use crate::routes::pages::{dashboard, health, root};
use crate::server::config::Settings;
use crate::server::state::AppState;

/// Build the CORS layer from the configured origins
pub fn cors_layer(settings: &Settings) -> CorsLayer {
    if settings.cors_origins.trim() == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = settings
        .cors_origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring unparseable CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (settings, pool, billing client)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/dashboard", get(dashboard));

    // Add API routes
    let router = configure_api_routes(router);

    // Add static file serving
    let router = router.nest_service("/static", ServeDir::new("public"));

    // Fallback handler for 404
    let router = router.fallback(|| async { "404 Not Found" });

    let cors = cors_layer(&app_state.settings);

    router.layer(cors).with_state(app_state)
}
