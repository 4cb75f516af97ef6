/**
 * API Error Type
 *
 * This is the single error type returned by HTTP handlers. Each variant
 * knows its HTTP status code and the `detail` string sent to the client.
 */

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::billing::BillingError;

/// Errors surfaced by HTTP handlers
///
/// Variants map one-to-one onto the HTTP status codes the API promises.
/// Internal variants (database, hashing, tokens, PDF) keep their source for
/// logging but never expose it in the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable credential on a protected request
    #[error("not authenticated")]
    Unauthorized,

    /// Login with an unknown email or a wrong password
    #[error("incorrect email or password")]
    InvalidCredentials,

    /// Registration with an email that is already taken
    #[error("email already registered")]
    EmailTaken,

    /// Invalid request input
    #[error("validation error: {message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Admin-reset secret mismatch
    #[error("forbidden")]
    Forbidden,

    /// Requested resource does not exist (or belongs to someone else)
    #[error("{what} not found")]
    NotFound {
        /// What was being looked up, e.g. "Analysis"
        what: &'static str,
    },

    /// Invoicing provider rejected the invoice or did not answer
    #[error("billing provider error")]
    BillingUpstream,

    /// Billing mapping or transport failure
    #[error(transparent)]
    Billing(#[from] BillingError),

    /// Server started without a database connection
    #[error("database not configured")]
    DatabaseUnavailable,

    /// Database query failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failure
    #[error("password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Token creation failure (verification failures become `Unauthorized`)
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// PDF rendering failure
    #[error("pdf rendering error: {0}")]
    Pdf(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::EmailTaken | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BillingUpstream => StatusCode::BAD_GATEWAY,
            Self::Billing(err) => match err {
                BillingError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
                BillingError::Http(_) => StatusCode::BAD_GATEWAY,
            },
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_)
            | Self::PasswordHash(_)
            | Self::Token(_)
            | Self::Pdf(_)
            | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the `detail` string sent to the client
    ///
    /// Internal errors answer a generic detail; the cause only goes to the
    /// log.
    pub fn detail(&self) -> String {
        match self {
            Self::Unauthorized => "Not authenticated".to_string(),
            Self::InvalidCredentials => "Incorrect email or password".to_string(),
            Self::EmailTaken => "Email already registered".to_string(),
            Self::Validation { message } => message.clone(),
            Self::Forbidden => "forbidden".to_string(),
            Self::NotFound { what } => format!("{what} not found"),
            Self::BillingUpstream => "Billing provider error".to_string(),
            Self::Billing(err) => match err {
                BillingError::InvalidPayload(message) => message.clone(),
                BillingError::Http(_) => "Billing provider error".to_string(),
            },
            Self::DatabaseUnavailable => "Database not configured".to_string(),
            Self::Database(_)
            | Self::PasswordHash(_)
            | Self::Token(_)
            | Self::Pdf(_)
            | Self::Serialization(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        let body = Json(serde_json::json!({ "detail": self.detail() }));

        if matches!(self, Self::Unauthorized) {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }

        (status, body).into_response()
    }
}
