//! Catalog summary endpoint

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Headline counts for the catalog
#[derive(Serialize, ToSchema)]
pub struct SummaryResponse {
    pub books: i64,
    pub authors: i64,
    pub genres: i64,
    pub languages: i64,
    pub users: i64,
    /// All registered copies
    pub instances: i64,
    pub instances_available: i64,
    pub instances_on_loan: i64,
    /// Copies whose due date is strictly in the past
    pub instances_overdue: i64,
}

/// Get catalog summary counts
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Catalog summary", body = SummaryResponse)
    )
)]
pub async fn get_summary(
    State(state): State<crate::AppState>,
) -> AppResult<Json<SummaryResponse>> {
    let today = Utc::now().date_naive();
    let summary = state.services.stats.get_summary(today).await?;
    Ok(Json(summary))
}
