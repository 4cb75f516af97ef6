//! Authentication Module
//!
//! This module handles user registration, login, logout and session
//! management. Sessions are stateless JWTs whose subject is the user's
//! lowercase email, delivered either as a JSON bearer token (API clients)
//! or as an HTTP-only cookie (browser flow).
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT tokens and the access cookie
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - User registration handler
//!     ├── login.rs    - JSON login, login page, web (cookie) login
//!     ├── logout.rs   - Cookie clearing handlers
//!     ├── me.rs       - Get current user handler
//!     └── admin_reset.rs - Emergency admin bootstrap
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: email normalized → uniqueness checked → password hashed
//!    (bcrypt) → user created
//! 2. **Login (JSON)**: credentials verified → JWT returned as a bearer token
//! 3. **Login (web form)**: credentials verified → JWT set as an HTTP-only
//!    cookie → redirect to the dashboard
//! 4. **Protected requests**: resolved cookie-first with bearer fallback by
//!    the `CurrentUser` extractor in `middleware::auth`
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage and never returned
//! - Unknown email and wrong password return the same 401 (no enumeration)
//! - Email uniqueness and lookups are case-insensitive

/// User data model and database operations
pub mod users;

/// JWT token and access-cookie management
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
pub use handlers::{force_admin_reset, login, login_page, login_web, logout, me};
