use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

use crate::Money;

use super::project;

/// One planned payment of an installment-type project.
///
/// Installments describe what is expected, not what was received. They are a
/// second one-to-many relation hanging off `projects`, which is exactly why
/// received money must never be summed across a join with this table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "installments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub project_id: i32,
    /// 1-based position in the plan.
    pub sequence: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Money,
    pub due_date: NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "project::Entity",
        from = "Column::ProjectId",
        to = "project::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
}

impl Related<project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
