/**
 * Analysis Model and Database Operations
 *
 * Every query here is scoped to an owner: analyses are strictly
 * per-tenant, and the owning row cascades on user deletion (enforced by
 * the schema).
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Analysis struct representing a stored analysis run
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Analysis {
    /// Unique analysis ID (UUID)
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Title given at submission
    pub title: String,
    /// First 280 characters of the submitted content
    pub input_summary: String,
    /// JSON-serialized result blob, produced by the handler
    pub result_json: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Insert a new analysis row
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `user_id` - Owning user
/// * `title` - Analysis title
/// * `input_summary` - Truncated input text
/// * `result_json` - Serialized result, always handler-produced JSON
///
/// # Returns
/// Created analysis or error
pub async fn insert_analysis(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    input_summary: &str,
    result_json: &str,
) -> Result<Analysis, sqlx::Error> {
    let id = Uuid::new_v4();

    let analysis = sqlx::query_as::<_, Analysis>(
        r#"
        INSERT INTO analyses (id, user_id, title, input_summary, result_json, created_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        RETURNING id, user_id, title, input_summary, result_json, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(input_summary)
    .bind(result_json)
    .fetch_one(pool)
    .await?;

    Ok(analysis)
}

/// List a user's analyses, newest first
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `user_id` - Owning user
///
/// # Returns
/// All analyses for the user ordered by recency
pub async fn list_analyses_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Analysis>, sqlx::Error> {
    let rows = sqlx::query_as::<_, Analysis>(
        r#"
        SELECT id, user_id, title, input_summary, result_json, created_at
        FROM analyses
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Get one analysis scoped to its owner
///
/// Another user's analysis is indistinguishable from a missing one.
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `analysis_id` - Analysis ID
/// * `user_id` - Requesting user
///
/// # Returns
/// Analysis or None if absent or owned by someone else
pub async fn get_analysis_for_user(
    pool: &PgPool,
    analysis_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Analysis>, sqlx::Error> {
    let analysis = sqlx::query_as::<_, Analysis>(
        r#"
        SELECT id, user_id, title, input_summary, result_json, created_at
        FROM analyses
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(analysis_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(analysis)
}
