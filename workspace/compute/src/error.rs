use thiserror::Error;
use tracing::error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The caller handed the aggregator data that breaks its contract,
    /// e.g. a negative budget or a transaction from another project.
    /// This is a wiring bug, not something an end user can fix.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A referenced row does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
}

impl ComputeError {
    /// Builds an [`ComputeError::InvalidInput`] and reports it to the logs,
    /// since it always points at a defect in the calling code.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        let err = ComputeError::InvalidInput(message.into());
        error!(?err, "Aggregator contract violated");
        err
    }

    pub fn project_not_found(id: i32) -> Self {
        ComputeError::NotFound {
            entity: "project",
            id,
        }
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
