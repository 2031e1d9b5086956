//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the project budget tracker here:
//! owners, projects, their installment plans, received transactions
//! and team assignments.

pub mod installment;
pub mod project;
pub mod project_team_member;
pub mod team_member;
pub mod transaction;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::installment::Entity as Installment;
    pub use super::project::Entity as Project;
    pub use super::project_team_member::Entity as ProjectTeamMember;
    pub use super::team_member::Entity as TeamMember;
    pub use super::transaction::Entity as Transaction;
    pub use super::user::Entity as User;
}
