//! Loan workflow endpoints: renewal and outstanding-loan lists

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::instance::{BookInstance, LoanListEntry},
};

use super::{AuthenticatedUser, PageQuery, PaginatedResponse};

/// Renewal request; an omitted date means "use the default proposal"
#[derive(Deserialize, ToSchema)]
pub struct RenewRequest {
    /// New due date (defaults to three weeks from today)
    pub renewal_date: Option<NaiveDate>,
}

/// Default renewal proposal, for form prefill
#[derive(Serialize, ToSchema)]
pub struct RenewalProposal {
    pub proposed_date: NaiveDate,
}

/// Get the default renewal proposal for a copy
#[utoipa::path(
    get,
    path = "/instances/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Proposed renewal date", body = RenewalProposal),
        (status = 403, description = "Missing mark-returned permission"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn renewal_proposal(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RenewalProposal>> {
    let today = Utc::now().date_naive();
    let proposed_date = state.services.loans.renewal_proposal(&claims, id, today).await?;
    Ok(Json(RenewalProposal { proposed_date }))
}

/// Renew a copy: move its due date within the four-week window
#[utoipa::path(
    post,
    path = "/instances/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    request_body = RenewRequest,
    responses(
        (status = 200, description = "Copy renewed", body = BookInstance),
        (status = 400, description = "Date rejected (PAST_DATE or TOO_FAR_AHEAD)"),
        (status = 403, description = "Missing mark-returned permission"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn renew_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<RenewRequest>,
) -> AppResult<Json<BookInstance>> {
    let today = Utc::now().date_naive();
    let instance = state
        .services
        .loans
        .renew(&claims, id, request.renewal_date, today)
        .await?;
    Ok(Json(instance))
}

/// Copies the current user has on loan, due date ascending
#[utoipa::path(
    get,
    path = "/catalog/my-loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Outstanding copies borrowed by the caller", body = PaginatedResponse<LoanListEntry>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<LoanListEntry>>> {
    let page = query.page();
    let today = Utc::now().date_naive();
    let (items, total) = state.services.loans.my_loans(&claims, page, today).await?;
    Ok(Json(PaginatedResponse::new(items, total, page)))
}

/// All copies currently on loan (not just overdue ones), due date ascending
#[utoipa::path(
    get,
    path = "/catalog/borrowed",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "All outstanding copies", body = PaginatedResponse<LoanListEntry>),
        (status = 403, description = "Missing mark-returned permission")
    )
)]
pub async fn all_borrowed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<LoanListEntry>>> {
    let page = query.page();
    let today = Utc::now().date_naive();
    let (items, total) = state.services.loans.all_on_loan(&claims, page, today).await?;
    Ok(Json(PaginatedResponse::new(items, total, page)))
}
