use sea_orm::entity::prelude::*;

use crate::Money;

use super::{team_member, user};

/// How the client pays for a project.
///
/// Purely informational: both kinds aggregate their transactions the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PaymentType {
    #[sea_orm(string_value = "fixed")]
    Fixed,
    #[sea_orm(string_value = "installment")]
    Installment,
}

/// A budgeted piece of work that money is received against.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    /// Agreed budget. Never negative.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub total_budget: Money,
    pub payment_type: PaymentType,
    /// The user who owns this project.
    pub created_by: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A project belongs to one owner.
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
    #[sea_orm(has_many = "super::installment::Entity")]
    Installment,
    /// Relation for the many-to-many relationship with team members.
    #[sea_orm(has_many = "super::project_team_member::Entity")]
    ProjectTeamMember,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl Related<super::installment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Installment.def()
    }
}

impl Related<team_member::Entity> for Entity {
    fn to() -> RelationDef {
        super::project_team_member::Relation::TeamMember.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::project_team_member::Relation::Project.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
