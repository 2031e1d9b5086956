use crate::handlers::{
    health::health_check,
    projects::{get_owner_summaries, get_project_summary, update_project_budget},
    team::{assign_project_team, get_project_team},
    transactions::{
        create_project_transaction, delete_transaction, get_project_transactions,
        update_transaction,
    },
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Project summaries and budget
        .route("/api/v1/projects/:project_id/summary", get(get_project_summary))
        .route("/api/v1/projects/:project_id/budget", put(update_project_budget))
        .route(
            "/api/v1/users/:owner_id/projects/summaries",
            get(get_owner_summaries),
        )
        // Transactions
        .route(
            "/api/v1/projects/:project_id/transactions",
            get(get_project_transactions).post(create_project_transaction),
        )
        .route(
            "/api/v1/transactions/:transaction_id",
            put(update_transaction).delete(delete_transaction),
        )
        // Team assignment
        .route(
            "/api/v1/projects/:project_id/team",
            get(get_project_team).put(assign_project_team),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
