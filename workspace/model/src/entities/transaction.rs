use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

use crate::Money;

use super::{installment, project};

/// Money received against a project.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub project_id: i32,
    /// Amount received. Only positive amounts are recorded.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Money,
    /// The installment this payment settles, if the project is paid in installments.
    pub installment_id: Option<i32>,
    pub recorded_at: NaiveDateTime,
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
    #[sea_orm(
        belongs_to = "installment::Entity",
        from = "Column::InstallmentId",
        to = "installment::Column::Id",
        on_delete = "SetNull"
    )]
    Installment,
}

impl Related<project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<installment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Installment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
