//! Server Module
//!
//! This module contains all code for initializing and configuring the Axum
//! HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Settings and database loading
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Settings**: all environment configuration is materialized into a
//!    `Settings` struct once, at startup
//! 2. **Database**: the PostgreSQL pool is created and migrations run;
//!    failures degrade to a db-less server rather than aborting
//! 3. **State Creation**: `AppState` bundles settings, pool and the billing
//!    client
//! 4. **Router Creation**: all routes and the CORS layer are configured

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::Settings;
pub use init::create_app;
pub use state::AppState;
