use sea_orm::entity::prelude::*;

/// A person who can be assigned to projects.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "team_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_team_member::Entity")]
    ProjectTeamMember,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        super::project_team_member::Relation::Project.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::project_team_member::Relation::TeamMember.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
