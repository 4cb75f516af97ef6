/**
 * Analysis Handlers
 *
 * - `POST /analysis` - run an analysis on submitted text and store it
 * - `GET /analysis` - list the caller's analyses, newest first
 * - `GET /analysis/{id}/pdf` - export one analysis as a PDF download
 *
 * The "analysis" itself is deliberately simple: the input is truncated to
 * its first 280 characters and two length metrics form the result. What
 * matters is the shape: the stored `result_json` is always JSON produced
 * here, never raw user input.
 */

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::analysis::db::{get_analysis_for_user, insert_analysis, list_analyses_for_user, Analysis};
use crate::analysis::pdf::build_analysis_pdf;
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::server::state::AppState;

/// Input summaries keep the first 280 characters of the submitted content
const INPUT_SUMMARY_CHARS: usize = 280;

/// Analysis submission
#[derive(Deserialize, Serialize, Debug)]
pub struct AnalysisCreate {
    /// Title for the stored analysis
    pub title: String,
    /// Text to analyze; only the first 280 characters are kept
    #[serde(default)]
    pub content: String,
}

/// Analysis response
///
/// `result_json` is decoded back into a JSON object so API clients never
/// see the stored string form.
#[derive(Serialize, Deserialize, Debug)]
pub struct AnalysisResponse {
    pub id: Uuid,
    pub title: String,
    pub input_summary: String,
    pub result_json: Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl AnalysisResponse {
    fn from_row(row: Analysis) -> Result<Self, ApiError> {
        let result_json = serde_json::from_str(&row.result_json)?;
        Ok(Self {
            id: row.id,
            title: row.title,
            input_summary: row.input_summary,
            result_json,
            created_at: row.created_at,
        })
    }
}

/// Truncate submitted content to the summary length
///
/// Counts characters, not bytes: slicing at a byte offset could split a
/// multibyte character and panic.
fn truncate_input(content: &str) -> String {
    content.chars().take(INPUT_SUMMARY_CHARS).collect()
}

/// Compute the analysis result for a submission
fn analysis_result(title: &str, input_summary: &str) -> Value {
    serde_json::json!({
        "summary_length": input_summary.chars().count(),
        "title_length": title.chars().count(),
    })
}

/// Run analysis handler
///
/// # Errors
///
/// * `401 Unauthorized` - no credential resolved
/// * `503 Service Unavailable` - database not configured
pub async fn run_analysis(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(data): Json<AnalysisCreate>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let pool = state.db_pool.as_ref().ok_or(ApiError::DatabaseUnavailable)?;

    let input_summary = truncate_input(&data.content);
    let result = analysis_result(&data.title, &input_summary);
    let result_json = serde_json::to_string(&result)?;

    let row = insert_analysis(pool, user.id, &data.title, &input_summary, &result_json).await?;

    tracing::info!("Analysis {} stored for {}", row.id, user.email);

    Ok(Json(AnalysisResponse::from_row(row)?))
}

/// List analyses handler
///
/// Returns the caller's analyses ordered by recency, newest first.
pub async fn list_my_analyses(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<AnalysisResponse>>, ApiError> {
    let pool = state.db_pool.as_ref().ok_or(ApiError::DatabaseUnavailable)?;

    let rows = list_analyses_for_user(pool, user.id).await?;
    let responses = rows
        .into_iter()
        .map(AnalysisResponse::from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(responses))
}

/// PDF export handler
///
/// # Errors
///
/// * `404 Not Found` - analysis absent or owned by someone else
pub async fn analysis_pdf(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(analysis_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let pool = state.db_pool.as_ref().ok_or(ApiError::DatabaseUnavailable)?;

    let analysis = get_analysis_for_user(pool, analysis_id, user.id)
        .await?
        .ok_or(ApiError::NotFound { what: "Analysis" })?;

    let result: Value = serde_json::from_str(&analysis.result_json)?;
    let pdf_bytes = build_analysis_pdf(&analysis.title, &analysis.input_summary, &result)?;

    let disposition = format!("attachment; filename=\"alerttrail_analysis_{analysis_id}.pdf\"");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf_bytes,
    )
        .into_response())
}
