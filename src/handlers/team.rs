use std::collections::BTreeSet;

use crate::schemas::{ApiError, ApiResponse, AppState, compute_error_response};
use axum::{
    extract::{Path, State},
    response::Json,
};
use common::{AssignTeamRequest, TeamAssignmentDto};
use compute::TeamAssignmentStore;
use tracing::{info, instrument, trace};

/// Get the team of a project
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/team",
    tag = "team",
    params(
        ("project_id" = i32, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Team retrieved successfully", body = ApiResponse<TeamAssignmentDto>),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_project_team(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<ApiResponse<TeamAssignmentDto>>, ApiError> {
    trace!("Entering get_project_team function");

    let members = state
        .store()
        .members_of(project_id)
        .await
        .map_err(compute_error_response)?;

    Ok(Json(ApiResponse::ok(
        TeamAssignmentDto {
            project_id,
            team_member_ids: members.into_iter().collect(),
            added: Vec::new(),
            removed: Vec::new(),
        },
        "Team retrieved successfully",
    )))
}

/// Replace the team of a project
///
/// The request lists the complete new team; members not listed are removed.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{project_id}/team",
    tag = "team",
    params(
        ("project_id" = i32, Path, description = "Project ID")
    ),
    request_body = AssignTeamRequest,
    responses(
        (status = 200, description = "Team replaced successfully", body = ApiResponse<TeamAssignmentDto>),
        (status = 404, description = "Project or team member not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn assign_project_team(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
    Json(request): Json<AssignTeamRequest>,
) -> Result<Json<ApiResponse<TeamAssignmentDto>>, ApiError> {
    trace!("Entering assign_project_team function");

    let requested: BTreeSet<i32> = request.team_member_ids.into_iter().collect();
    let store = state.store();
    let change = store
        .assign(project_id, &requested)
        .await
        .map_err(compute_error_response)?;

    info!(
        "Team of project {} replaced: {} added, {} removed",
        project_id,
        change.added.len(),
        change.removed.len()
    );

    Ok(Json(ApiResponse::ok(
        TeamAssignmentDto {
            project_id,
            team_member_ids: requested.into_iter().collect(),
            added: change.added.into_iter().collect(),
            removed: change.removed.into_iter().collect(),
        },
        "Team replaced successfully",
    )))
}
