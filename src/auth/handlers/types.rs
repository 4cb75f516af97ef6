/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication
 * handlers. These types are shared across register, login, and me handlers.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::users::User;

/// Registration request
///
/// Contains the email, optional display name and password for user
/// registration.
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// User's email address (normalized before storage)
    pub email: String,
    /// Display name; empty when omitted
    #[serde(default)]
    pub name: String,
    /// User's password (hashed before storage)
    pub password: String,
}

/// Login request (JSON API)
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    /// User's email address, any casing
    pub email: String,
    /// User's password (verified against the stored hash)
    pub password: String,
}

/// Login form (browser flow, posts to `/auth/login/web`)
#[derive(Deserialize, Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Bearer token response returned by the JSON login
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    /// Signed JWT, subject = lowercase email
    pub access_token: String,
    /// Always `"bearer"`
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// User response (without sensitive data)
///
/// Contains user information that is safe to return to clients.
/// Does not include the password hash.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    /// User's unique ID (UUID)
    pub id: Uuid,
    /// User's email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Whether the user has paid for the pro tier
    pub is_pro: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            is_pro: user.is_pro,
        }
    }
}

/// Query parameters for the admin reset endpoint
#[derive(Deserialize, Debug)]
pub struct AdminResetQuery {
    /// Must match `ADMIN_SETUP_SECRET` (or `SECRET_KEY` as fallback)
    pub secret: String,
}
