//! Route Configuration
//!
//! Router assembly lives here: `router.rs` combines page routes, the API
//! route table from `api_routes.rs`, static file serving and the CORS
//! layer into the final application router.

/// Main router assembly
pub mod router;

/// API route table
pub mod api_routes;

/// Root, health and dashboard handlers
pub mod pages;

pub use router::create_router;
