//! Read access to the rows the summaries are computed from.
//!
//! The traits keep the aggregation independent of SeaORM so tests can drive
//! it from memory. [`DbStore`] is the production implementation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, instrument};

use model::entities::{project, transaction};

use crate::error::{ComputeError, Result};
use crate::team::AssignmentChange;

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Fails with [`ComputeError::NotFound`] when the project does not exist.
    async fn get_by_id(&self, project_id: i32) -> Result<project::Model>;

    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<project::Model>>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// All transactions of one project.
    ///
    /// Implementations must filter the transactions table alone. Joining it
    /// against another one-to-many relation of the project repeats rows.
    async fn list_by_project(&self, project_id: i32) -> Result<Vec<transaction::Model>>;
}

#[async_trait]
pub trait TeamAssignmentStore: Send + Sync {
    /// Replaces the whole set of team members assigned to the project.
    async fn assign(&self, project_id: i32, member_ids: &BTreeSet<i32>)
    -> Result<AssignmentChange>;

    async fn members_of(&self, project_id: i32) -> Result<BTreeSet<i32>>;
}

/// Everything a summary is computed from.
pub trait LedgerStore: ProjectStore + TransactionStore {}

impl<T: ProjectStore + TransactionStore> LedgerStore for T {}

/// SeaORM backed store.
#[derive(Debug, Clone)]
pub struct DbStore {
    db: DatabaseConnection,
}

impl DbStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl ProjectStore for DbStore {
    #[instrument(skip(self))]
    async fn get_by_id(&self, project_id: i32) -> Result<project::Model> {
        project::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ComputeError::project_not_found(project_id))
    }

    #[instrument(skip(self))]
    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<project::Model>> {
        let projects = project::Entity::find()
            .filter(project::Column::CreatedBy.eq(owner_id))
            .order_by_asc(project::Column::Id)
            .all(&self.db)
            .await?;
        debug!(count = projects.len(), "Loaded projects of owner");
        Ok(projects)
    }
}

#[async_trait]
impl TransactionStore for DbStore {
    #[instrument(skip(self))]
    async fn list_by_project(&self, project_id: i32) -> Result<Vec<transaction::Model>> {
        let transactions = transaction::Entity::find()
            .filter(transaction::Column::ProjectId.eq(project_id))
            .order_by_asc(transaction::Column::Id)
            .all(&self.db)
            .await?;
        debug!(count = transactions.len(), "Loaded project transactions");
        Ok(transactions)
    }
}
