/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations.
 *
 * Emails are stored lowercase and compared case-insensitively: every lookup
 * goes through `LOWER(email)` and matches the unique index created by the
 * migrations.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// User email address (stored lowercase, unique case-insensitively)
    pub email: String,
    /// Display name (may be empty)
    pub name: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Whether the user has paid for the pro tier
    pub is_pro: bool,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Normalize an email for storage and lookup
///
/// Trims surrounding whitespace and lowercases. Every write and every query
/// in this module funnels through this, which is what makes the uniqueness
/// guarantee case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `email` - User email (normalized before insert)
/// * `name` - Display name
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user or error
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    name: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, name, password_hash, is_pro, created_at)
        VALUES ($1, $2, $3, $4, FALSE, NOW())
        RETURNING id, email, name, password_hash, is_pro, created_at
        "#,
    )
    .bind(id)
    .bind(normalize_email(email))
    .bind(name)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get a user by email, case-insensitively
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `email` - User email in any casing
///
/// # Returns
/// User or None if not found
pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let normalized = normalize_email(email);
    if normalized.is_empty() {
        return Ok(None);
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, name, password_hash, is_pro, created_at
        FROM users
        WHERE LOWER(email) = $1
        "#,
    )
    .bind(normalized)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Overwrite a user's password hash, filling in the name if it was empty
///
/// Used by the admin bootstrap endpoint to reset an existing account.
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `user_id` - User ID
/// * `password_hash` - New hashed password
/// * `name` - Name to set only when the stored one is empty
///
/// # Returns
/// Updated user or error
pub async fn update_admin_user(
    pool: &PgPool,
    user_id: Uuid,
    password_hash: &str,
    name: &str,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET password_hash = $1,
            name = CASE WHEN name = '' THEN $2 ELSE name END
        WHERE id = $3
        RETURNING id, email, name, password_hash, is_pro, created_at
        "#,
    )
    .bind(password_hash)
    .bind(name)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Mark the user with the given email as pro
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `email` - Payer email in any casing
///
/// # Returns
/// Whether a user row was updated
pub async fn set_pro_by_email(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET is_pro = TRUE
        WHERE LOWER(email) = $1
        "#,
    )
    .bind(normalize_email(email))
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_lowercases() {
        assert_eq!(normalize_email("User@Example.COM"), "user@example.com");
    }

    #[test]
    fn test_normalize_email_trims() {
        assert_eq!(normalize_email("  user@example.com \n"), "user@example.com");
    }

    #[test]
    fn test_normalize_email_empty() {
        assert_eq!(normalize_email("   "), "");
    }
}
