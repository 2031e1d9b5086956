use std::sync::Arc;

use axum::{Json, http::StatusCode};
use common::{
    AssignTeamRequest, CreateTransactionRequest, FinancialSummaryDto, TeamAssignmentDto,
    TransactionDto, UpdateBudgetRequest, UpdateTransactionRequest,
};
use compute::{DbStore, SummaryProvider, error::ComputeError};
use sea_orm::{DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{OpenApi, ToSchema};

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Produces project summaries and receives invalidations after writes
    pub summaries: Arc<dyn SummaryProvider>,
}

impl AppState {
    pub fn store(&self) -> DbStore {
        DbStore::new(self.db.clone())
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Maps compute errors to HTTP. A violated aggregation contract is a server
/// bug, so the details go to the log and the client gets a generic 500.
pub fn compute_error_response(err: ComputeError) -> ApiError {
    match err {
        ComputeError::NotFound { .. } => error_response(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        ComputeError::InvalidInput(ref message) => {
            error!("Summary computation rejected its input: {}", message);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "SUMMARY_ERROR",
                "Failed to compute financial summary",
            )
        }
        ComputeError::Database(db_error) => database_error_response(db_error),
    }
}

pub fn database_error_response(db_error: DbErr) -> ApiError {
    error!("Database error: {}", db_error);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "DATABASE_ERROR",
        "Database error",
    )
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::projects::get_project_summary,
        crate::handlers::projects::get_owner_summaries,
        crate::handlers::projects::update_project_budget,
        crate::handlers::transactions::get_project_transactions,
        crate::handlers::transactions::create_project_transaction,
        crate::handlers::transactions::update_transaction,
        crate::handlers::transactions::delete_transaction,
        crate::handlers::team::get_project_team,
        crate::handlers::team::assign_project_team,
    ),
    components(
        schemas(
            ApiResponse<FinancialSummaryDto>,
            ApiResponse<Vec<FinancialSummaryDto>>,
            ApiResponse<TransactionDto>,
            ApiResponse<Vec<TransactionDto>>,
            ApiResponse<TeamAssignmentDto>,
            ErrorResponse,
            HealthResponse,
            FinancialSummaryDto,
            TransactionDto,
            CreateTransactionRequest,
            UpdateTransactionRequest,
            UpdateBudgetRequest,
            AssignTeamRequest,
            TeamAssignmentDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "projects", description = "Project financial summaries and budgets"),
        (name = "transactions", description = "Payments received for projects"),
        (name = "team", description = "Team assignment of projects"),
    ),
    info(
        title = "Project Ledger API",
        description = "Project budget tracking with live financial summaries",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
