/**
 * Session Management: JWT Tokens and the Access Cookie
 *
 * This module handles JWT token generation and validation for user
 * sessions, and the HTTP-only `access_token` cookie used by the browser
 * flow. Both carry the same token; the subject claim is the user's
 * lowercase email.
 */

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::server::config::Settings;

/// Name of the session cookie
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Cookie lifetime: 7 days, independent of the token expiry inside it
const COOKIE_MAX_AGE_DAYS: i64 = 7;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's lowercase email
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `email` - User email; stored as the subject claim, lowercased
/// * `settings` - Source of the signing secret and expiry
///
/// # Returns
/// JWT token string
pub fn create_token(
    email: &str,
    settings: &Settings,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let exp = now + settings.access_token_expire_minutes * 60;

    let claims = Claims {
        sub: email.to_lowercase(),
        exp,
        iat: now,
    };

    let key = EncodingKey::from_secret(settings.secret_key.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
///
/// # Arguments
/// * `token` - JWT token string
/// * `settings` - Source of the signing secret
///
/// # Returns
/// Decoded claims or error
pub fn verify_token(
    token: &str,
    settings: &Settings,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(settings.secret_key.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// Build the HTTP-only access cookie carrying a freshly issued token
///
/// HTTP-only, `Secure`, `SameSite=Lax`, path `/`, 7-day max-age, and the
/// configured shared domain when one is set.
pub fn access_cookie(token: String, settings: &Settings) -> Cookie<'static> {
    let mut builder = Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::days(COOKIE_MAX_AGE_DAYS));

    if let Some(domain) = &settings.cookie_domain {
        builder = builder.domain(domain.clone());
    }

    builder.build()
}

/// Remove the access cookie from the jar
///
/// Removes the plain cookie, and the domain-scoped variant too when a
/// cookie domain is configured, matching how the cookie may have been
/// issued.
pub fn clear_access_cookies(jar: CookieJar, settings: &Settings) -> CookieJar {
    let mut plain = Cookie::from(ACCESS_TOKEN_COOKIE);
    plain.set_path("/");
    let mut jar = jar.remove(plain);

    if let Some(domain) = &settings.cookie_domain {
        let mut scoped = Cookie::from(ACCESS_TOKEN_COOKIE);
        scoped.set_path("/");
        scoped.set_domain(domain.clone());
        jar = jar.remove(scoped);
    }

    jar
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            secret_key: "test-secret".to_string(),
            access_token_expire_minutes: 60,
            cors_origins: "*".to_string(),
            cookie_domain: None,
            admin_setup_secret: None,
            admin_email: None,
            admin_pass: None,
            admin_name: "Admin".to_string(),
            fact_api_key: None,
            fact_cuit: None,
            fact_pto_vta: 1,
        }
    }

    #[test]
    fn test_create_token() {
        let settings = test_settings();
        let result = create_token("test@example.com", &settings);
        assert!(result.is_ok());
        assert!(!result.unwrap().is_empty());
    }

    #[test]
    fn test_verify_token_round_trip() {
        let settings = test_settings();
        let token = create_token("test@example.com", &settings).unwrap();

        let claims = verify_token(&token, &settings).unwrap();
        assert_eq!(claims.sub, "test@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_subject_is_lowercased() {
        let settings = test_settings();
        let token = create_token("User@Example.COM", &settings).unwrap();

        let claims = verify_token(&token, &settings).unwrap();
        assert_eq!(claims.sub, "user@example.com");
    }

    #[test]
    fn test_verify_invalid_token() {
        let settings = test_settings();
        let result = verify_token("invalid.token.here", &settings);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let settings = test_settings();
        let token = create_token("test@example.com", &settings).unwrap();

        let mut other = test_settings();
        other.secret_key = "different-secret".to_string();
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_access_cookie_attributes() {
        let settings = test_settings();
        let cookie = access_cookie("tok".to_string(), &settings);

        assert_eq!(cookie.name(), ACCESS_TOKEN_COOKIE);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
        assert_eq!(cookie.domain(), None);
    }

    #[test]
    fn test_access_cookie_with_domain() {
        let mut settings = test_settings();
        settings.cookie_domain = Some(".alerttrail.com".to_string());

        let cookie = access_cookie("tok".to_string(), &settings);
        assert_eq!(cookie.domain(), Some(".alerttrail.com"));
    }
}
