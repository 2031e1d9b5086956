use crate::schemas::{
    ApiError, ApiResponse, AppState, compute_error_response,
    database_error_response, error_response,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::Utc;
use common::{CreateTransactionRequest, TransactionDto, UpdateTransactionRequest};
use compute::error::ComputeError;
use model::entities::{installment, project, transaction};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use tracing::{debug, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters for listing the transactions of a project
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct TransactionListQuery {
    /// Page number (default: 1)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Page size (default: 50)
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u64>,
}

fn to_dto(model: transaction::Model) -> TransactionDto {
    TransactionDto {
        id: model.id,
        project_id: model.project_id,
        amount: model.amount.into(),
        installment_id: model.installment_id,
        recorded_at: model.recorded_at,
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), ApiError> {
    if amount <= Decimal::ZERO {
        warn!("Rejected non-positive amount {}", amount);
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_AMOUNT",
            "Amount must be positive",
        ));
    }
    Ok(())
}

async fn ensure_project(db: &DatabaseConnection, project_id: i32) -> Result<project::Model, ApiError> {
    project::Entity::find_by_id(project_id)
        .one(db)
        .await
        .map_err(database_error_response)?
        .ok_or_else(|| compute_error_response(ComputeError::project_not_found(project_id)))
}

/// A payment may only settle an installment of its own project.
async fn ensure_installment(
    db: &DatabaseConnection,
    installment_id: i32,
    project_id: i32,
) -> Result<(), ApiError> {
    let found = installment::Entity::find_by_id(installment_id)
        .one(db)
        .await
        .map_err(database_error_response)?;

    match found {
        Some(installment) if installment.project_id == project_id => Ok(()),
        _ => {
            warn!(
                "Installment {} does not belong to project {}",
                installment_id, project_id
            );
            Err(error_response(
                StatusCode::BAD_REQUEST,
                "INVALID_INSTALLMENT",
                format!("Installment {} does not belong to project {}", installment_id, project_id),
            ))
        }
    }
}

/// List the transactions of a project
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/transactions",
    tag = "transactions",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
        TransactionListQuery
    ),
    responses(
        (status = 200, description = "Transactions retrieved successfully", body = ApiResponse<Vec<TransactionDto>>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_project_transactions(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
    Valid(Query(query)): Valid<Query<TransactionListQuery>>,
) -> Result<Json<ApiResponse<Vec<TransactionDto>>>, ApiError> {
    trace!("Entering get_project_transactions function");

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(50);
    debug!("Fetching transactions - page: {}, limit: {}", page, limit);

    ensure_project(&state.db, project_id).await?;

    let transactions = transaction::Entity::find()
        .filter(transaction::Column::ProjectId.eq(project_id))
        .order_by_asc(transaction::Column::Id)
        .paginate(&state.db, limit)
        .fetch_page(page - 1)
        .await
        .map_err(database_error_response)?;

    info!("Retrieved {} transactions of project {}", transactions.len(), project_id);
    Ok(Json(ApiResponse::ok(
        transactions.into_iter().map(to_dto).collect(),
        "Transactions retrieved successfully",
    )))
}

/// Record a payment received for a project
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/transactions",
    tag = "transactions",
    params(
        ("project_id" = i32, Path, description = "Project ID")
    ),
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created successfully", body = ApiResponse<TransactionDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_project_transaction(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionDto>>), ApiError> {
    trace!("Entering create_project_transaction function");

    ensure_positive(request.amount)?;
    ensure_project(&state.db, project_id).await?;
    if let Some(installment_id) = request.installment_id {
        ensure_installment(&state.db, installment_id, project_id).await?;
    }

    let created = transaction::ActiveModel {
        project_id: Set(project_id),
        amount: Set(request.amount.into()),
        installment_id: Set(request.installment_id),
        recorded_at: Set(request
            .recorded_at
            .unwrap_or_else(|| Utc::now().naive_utc())),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(database_error_response)?;

    state.summaries.on_transaction_changed(project_id).await;
    info!(
        "Recorded transaction {} of {} for project {}",
        created.id, created.amount, project_id
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(to_dto(created), "Transaction created successfully")),
    ))
}

/// Edit a recorded payment
///
/// Moving a payment to another project refreshes both projects' summaries.
#[utoipa::path(
    put,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("transaction_id" = i32, Path, description = "Transaction ID")
    ),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Transaction updated successfully", body = ApiResponse<TransactionDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Transaction or project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<i32>,
    Json(request): Json<UpdateTransactionRequest>,
) -> Result<Json<ApiResponse<TransactionDto>>, ApiError> {
    trace!("Entering update_transaction function");

    let existing = find_transaction(&state.db, transaction_id).await?;
    let old_project_id = existing.project_id;
    let new_project_id = request.project_id.unwrap_or(old_project_id);

    if let Some(amount) = request.amount {
        ensure_positive(amount)?;
    }
    if new_project_id != old_project_id {
        ensure_project(&state.db, new_project_id).await?;
    }
    if let Some(Some(installment_id)) = request.installment_id {
        ensure_installment(&state.db, installment_id, new_project_id).await?;
    }

    let mut active = existing.clone().into_active_model();
    active.project_id = Set(new_project_id);
    if let Some(amount) = request.amount {
        active.amount = Set(amount.into());
    }
    if let Some(recorded_at) = request.recorded_at {
        active.recorded_at = Set(recorded_at);
    }
    match request.installment_id {
        Some(installment_id) => active.installment_id = Set(installment_id),
        // The old installment belongs to the old project
        None if new_project_id != old_project_id => active.installment_id = Set(None),
        None => {}
    }

    let updated = active.update(&state.db).await.map_err(database_error_response)?;

    state.summaries.on_transaction_changed(old_project_id).await;
    if new_project_id != old_project_id {
        state.summaries.on_transaction_changed(new_project_id).await;
        info!(
            "Moved transaction {} from project {} to {}",
            transaction_id, old_project_id, new_project_id
        );
    } else {
        info!("Updated transaction {}", transaction_id);
    }

    Ok(Json(ApiResponse::ok(to_dto(updated), "Transaction updated successfully")))
}

/// Delete a recorded payment
#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("transaction_id" = i32, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction deleted successfully", body = ApiResponse<TransactionDto>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<i32>,
) -> Result<Json<ApiResponse<TransactionDto>>, ApiError> {
    trace!("Entering delete_transaction function");

    let existing = find_transaction(&state.db, transaction_id).await?;
    let project_id = existing.project_id;

    existing
        .clone()
        .delete(&state.db)
        .await
        .map_err(database_error_response)?;

    state.summaries.on_transaction_changed(project_id).await;
    info!("Deleted transaction {} of project {}", transaction_id, project_id);

    Ok(Json(ApiResponse::ok(to_dto(existing), "Transaction deleted successfully")))
}

async fn find_transaction(
    db: &DatabaseConnection,
    transaction_id: i32,
) -> Result<transaction::Model, ApiError> {
    transaction::Entity::find_by_id(transaction_id)
        .one(db)
        .await
        .map_err(database_error_response)?
        .ok_or_else(|| {
            compute_error_response(ComputeError::NotFound {
                entity: "transaction",
                id: transaction_id,
            })
        })
}
