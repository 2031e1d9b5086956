use crate::schemas::{
    ApiError, ApiResponse, AppState, compute_error_response,
    database_error_response, error_response,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{FinancialSummaryDto, UpdateBudgetRequest};
use compute::error::ComputeError;
use model::entities::project;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use tracing::{debug, info, instrument, trace, warn};

/// Get the financial summary of a project
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/summary",
    tag = "projects",
    params(
        ("project_id" = i32, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Summary computed successfully", body = ApiResponse<FinancialSummaryDto>),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_project_summary(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<ApiResponse<FinancialSummaryDto>>, ApiError> {
    trace!("Entering get_project_summary function");

    let summary = state
        .summaries
        .financial_summary(project_id)
        .await
        .map_err(compute_error_response)?;

    debug!(
        "Project {} received {} of {}",
        project_id, summary.received_amount, summary.total_budget
    );
    Ok(Json(ApiResponse::ok(
        FinancialSummaryDto::from(summary),
        "Financial summary retrieved successfully",
    )))
}

/// Get the financial summaries of every project of a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{owner_id}/projects/summaries",
    tag = "projects",
    params(
        ("owner_id" = i32, Path, description = "Owner user ID")
    ),
    responses(
        (status = 200, description = "Summaries computed successfully", body = ApiResponse<Vec<FinancialSummaryDto>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_owner_summaries(
    State(state): State<AppState>,
    Path(owner_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<FinancialSummaryDto>>>, ApiError> {
    trace!("Entering get_owner_summaries function");

    let summaries = state
        .summaries
        .summaries_for_owner(owner_id)
        .await
        .map_err(compute_error_response)?;

    info!("Computed {} summaries for owner {}", summaries.len(), owner_id);
    Ok(Json(ApiResponse::ok(
        summaries.into_iter().map(FinancialSummaryDto::from).collect(),
        "Financial summaries retrieved successfully",
    )))
}

/// Change the budget of a project
///
/// The returned summary already reflects the new budget.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{project_id}/budget",
    tag = "projects",
    params(
        ("project_id" = i32, Path, description = "Project ID")
    ),
    request_body = UpdateBudgetRequest,
    responses(
        (status = 200, description = "Budget updated successfully", body = ApiResponse<FinancialSummaryDto>),
        (status = 400, description = "Negative budget", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_project_budget(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
    Json(request): Json<UpdateBudgetRequest>,
) -> Result<Json<ApiResponse<FinancialSummaryDto>>, ApiError> {
    trace!("Entering update_project_budget function");

    if request.total_budget < Decimal::ZERO {
        warn!("Rejected negative budget {} for project {}", request.total_budget, project_id);
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_BUDGET",
            "Budget must not be negative",
        ));
    }

    let existing = project::Entity::find_by_id(project_id)
        .one(&state.db)
        .await
        .map_err(database_error_response)?
        .ok_or_else(|| compute_error_response(ComputeError::project_not_found(project_id)))?;

    let previous_budget = existing.total_budget;
    let mut active = existing.into_active_model();
    active.total_budget = Set(request.total_budget.into());
    active.update(&state.db).await.map_err(database_error_response)?;

    state.summaries.on_project_budget_changed(project_id).await;
    info!(
        "Budget of project {} changed from {} to {}",
        project_id, previous_budget, request.total_budget
    );

    let summary = state
        .summaries
        .financial_summary(project_id)
        .await
        .map_err(compute_error_response)?;

    Ok(Json(ApiResponse::ok(
        FinancialSummaryDto::from(summary),
        "Budget updated successfully",
    )))
}
