//! AlertTrail - Main Library
//!
//! AlertTrail is a small multi-tenant web backend: user registration and
//! login with JWT sessions (bearer token or HTTP-only cookie), a text
//! analysis feature with history and PDF export, and a payment-webhook to
//! invoicing-provider bridge.
//!
//! # Overview
//!
//! This library provides:
//! - Axum HTTP server setup and configuration
//! - Dual-mode session authentication (cookie-first, bearer fallback)
//! - User and analysis persistence (PostgreSQL via sqlx)
//! - PDF export of stored analyses
//! - Mercado Pago webhook handling and Facturante invoice issuing
//!
//! # Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs          - Module exports and documentation
//! ├── main.rs         - Server entry point
//! ├── server/         - Settings, state, initialization
//! ├── routes/         - Router assembly and page handlers
//! ├── auth/           - Registration, login, sessions, users
//! ├── middleware/     - Authentication resolution extractors
//! ├── analysis/       - Analysis feature (run, list, PDF export)
//! ├── billing/        - Invoicing provider integration
//! ├── webhooks/       - Payment webhook handler
//! └── error/          - API error type
//! ```
//!
//! # State Management
//!
//! Handlers share an `AppState` holding the settings, the optional
//! PostgreSQL pool and the billing client. The pool is optional by design:
//! without `DATABASE_URL` the server still starts and database-backed
//! handlers answer 503.
//!
//! # Error Handling
//!
//! All handlers return `Result<_, ApiError>`; the error knows its HTTP
//! status and renders a `{"detail": ...}` JSON body.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Request-processing middleware (authentication extractors)
pub mod middleware;

/// Analysis feature
pub mod analysis;

/// Billing provider integration
pub mod billing;

/// Payment webhooks
pub mod webhooks;

/// API error types
pub mod error;

// Re-export commonly used types
pub use error::ApiError;
pub use server::{create_app, AppState, Settings};
