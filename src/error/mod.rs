//! API Error Types
//!
//! This module defines the error type shared by all HTTP handlers and its
//! conversion into HTTP responses.
//!
//! # Error Mapping
//!
//! - missing/invalid credentials → 401 (plus `WWW-Authenticate: Bearer`)
//! - duplicate registration, invalid input → 400
//! - admin-reset secret mismatch → 403
//! - missing resource → 404
//! - billing upstream failure → 502
//! - database not configured → 503
//! - everything internal (database, hashing, tokens, PDF, serialization) → 500
//!
//! Responses carry a JSON body of the form `{"detail": "..."}`. Internal
//! errors log their cause and return a generic detail so nothing leaks.

/// Error type and HTTP conversion
pub mod types;

pub use types::ApiError;
