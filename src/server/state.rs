/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - Settings loaded from the environment
 * - The optional PostgreSQL connection pool
 * - The invoicing provider client
 *
 * # Thread Safety
 *
 * All fields are cheap to clone and safe for concurrent use: `Arc` for
 * settings and the billing client, and `PgPool` which is internally
 * reference-counted.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`. This follows
 * Axum's recommended pattern for state management.
 */

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::billing::provider::FacturanteProvider;
use crate::server::config::Settings;

/// Application state shared by all request handlers
///
/// # Fields
///
/// * `settings` - environment configuration, read-only after startup
/// * `db_pool` - `None` if the database is not configured (e.g. when the
///   `DATABASE_URL` environment variable is not set); handlers answer 503
///   in that case
/// * `billing` - invoicing provider client used by the payment webhook
#[derive(Clone)]
pub struct AppState {
    /// Environment configuration, read-only after startup
    pub settings: Arc<Settings>,

    /// Database connection pool
    ///
    /// This is `None` if the database is not configured. Handlers check
    /// for `None` before using the database.
    pub db_pool: Option<PgPool>,

    /// Invoicing provider client
    pub billing: Arc<FacturanteProvider>,
}

impl AppState {
    /// Build the state from its parts
    pub fn new(settings: Settings, db_pool: Option<PgPool>) -> Self {
        let billing = Arc::new(FacturanteProvider::from_settings(&settings));
        Self {
            settings: Arc::new(settings),
            db_pool,
            billing,
        }
    }
}

/// Allow handlers to extract just the optional pool with
/// `State(pool): State<Option<PgPool>>`
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Allow handlers to extract just the settings with
/// `State(settings): State<Arc<Settings>>`
impl FromRef<AppState> for Arc<Settings> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.settings.clone()
    }
}
