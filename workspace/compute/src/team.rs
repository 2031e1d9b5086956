//! Set-replace assignment of team members to projects.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};

use model::entities::{project, project_team_member, team_member};

use crate::error::{ComputeError, Result};
use crate::store::{DbStore, TeamAssignmentStore};

/// Difference between the previous and the requested assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentChange {
    pub added: BTreeSet<i32>,
    pub removed: BTreeSet<i32>,
}

impl AssignmentChange {
    pub fn between(current: &BTreeSet<i32>, requested: &BTreeSet<i32>) -> Self {
        Self {
            added: requested.difference(current).copied().collect(),
            removed: current.difference(requested).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

async fn ensure_project<C: ConnectionTrait>(db: &C, project_id: i32) -> Result<()> {
    project::Entity::find_by_id(project_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or_else(|| ComputeError::project_not_found(project_id))
}

async fn current_members<C: ConnectionTrait>(db: &C, project_id: i32) -> Result<BTreeSet<i32>> {
    let ids: Vec<i32> = project_team_member::Entity::find()
        .select_only()
        .column(project_team_member::Column::TeamMemberId)
        .filter(project_team_member::Column::ProjectId.eq(project_id))
        .into_tuple()
        .all(db)
        .await?;
    Ok(ids.into_iter().collect())
}

#[async_trait]
impl TeamAssignmentStore for DbStore {
    #[instrument(skip(self))]
    async fn assign(
        &self,
        project_id: i32,
        member_ids: &BTreeSet<i32>,
    ) -> Result<AssignmentChange> {
        let txn = self.connection().begin().await?;

        ensure_project(&txn, project_id).await?;

        if !member_ids.is_empty() {
            let known: Vec<i32> = team_member::Entity::find()
                .select_only()
                .column(team_member::Column::Id)
                .filter(team_member::Column::Id.is_in(member_ids.iter().copied()))
                .into_tuple()
                .all(&txn)
                .await?;
            let known: BTreeSet<i32> = known.into_iter().collect();
            if let Some(&missing) = member_ids.difference(&known).next() {
                return Err(ComputeError::NotFound {
                    entity: "team member",
                    id: missing,
                });
            }
        }

        let current = current_members(&txn, project_id).await?;
        let change = AssignmentChange::between(&current, member_ids);

        if !change.removed.is_empty() {
            project_team_member::Entity::delete_many()
                .filter(project_team_member::Column::ProjectId.eq(project_id))
                .filter(
                    project_team_member::Column::TeamMemberId
                        .is_in(change.removed.iter().copied()),
                )
                .exec(&txn)
                .await?;
        }

        if !change.added.is_empty() {
            let links = change
                .added
                .iter()
                .map(|&team_member_id| project_team_member::ActiveModel {
                    project_id: Set(project_id),
                    team_member_id: Set(team_member_id),
                });
            project_team_member::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        info!(
            added = change.added.len(),
            removed = change.removed.len(),
            "Team assignment replaced"
        );
        Ok(change)
    }

    #[instrument(skip(self))]
    async fn members_of(&self, project_id: i32) -> Result<BTreeSet<i32>> {
        ensure_project(self.connection(), project_id).await?;
        current_members(self.connection(), project_id).await
    }
}
