//! HTTP handlers for authentication endpoints
//!
//! One file per handler, shared request/response types in `types.rs`.

/// Request/response types
pub mod types;

/// User registration handler
pub mod register;

/// JSON login, login page and web (cookie) login
pub mod login;

/// Cookie clearing handlers
pub mod logout;

/// Get current user handler
pub mod me;

/// Emergency admin bootstrap
pub mod admin_reset;

pub use admin_reset::force_admin_reset;
pub use login::{login, login_page, login_web};
pub use logout::{clear_cookie, logout};
pub use me::me;
pub use register::register;
