/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server:
 * settings loading, database loading, state creation and route
 * configuration.
 *
 * # Initialization Process
 *
 * 1. Load settings from the environment
 * 2. Load the optional database pool (runs migrations)
 * 3. Create the application state (settings, pool, billing client)
 * 4. Create and configure the router
 *
 * # Error Handling
 *
 * The function is designed to be resilient:
 * - Missing database: server continues, db-backed handlers answer 503
 * - Migration failures: logged but don't prevent startup
 */

use axum::Router;

use crate::routes::router::create_router;
use crate::server::config::{load_database, Settings};
use crate::server::state::AppState;

/// Create and configure the Axum application
///
/// This function sets up the Axum HTTP server with:
/// - Settings loaded from the environment
/// - Database connection pool (if configured)
/// - Route configuration and the CORS layer
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing AlertTrail backend server");

    // Step 1: Load settings
    let settings = Settings::from_env();

    // Step 2: Load the optional database pool (runs migrations)
    let db_pool = load_database().await;

    // Step 3: Create app state
    let app_state = AppState::new(settings, db_pool);

    tracing::info!("Application state initialized");

    // Step 4: Create router with all routes
    create_router(app_state)
}
