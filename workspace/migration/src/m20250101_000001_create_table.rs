use sea_orm_migration::{prelude::*, schema::*, sea_orm::DbBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Money column. SQLite decimals are read back as `f64`, so SQLite stores the
/// decimal string in a `TEXT` column instead.
fn money<T: IntoIden>(manager: &SchemaManager, col: T) -> ColumnDef {
    match manager.get_database_backend() {
        DbBackend::Sqlite => text(col),
        _ => decimal_len(col, 16, 4),
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .to_owned(),
            )
            .await?;

        // Create projects table
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(pk_auto(Projects::Id))
                    .col(string(Projects::Title))
                    .col(money(manager, Projects::TotalBudget))
                    .col(string_len(Projects::PaymentType, 20))
                    .col(integer(Projects::CreatedBy))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_owner")
                            .from(Projects::Table, Projects::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_created_by")
                    .table(Projects::Table)
                    .col(Projects::CreatedBy)
                    .to_owned(),
            )
            .await?;

        // Create installments table
        manager
            .create_table(
                Table::create()
                    .table(Installments::Table)
                    .if_not_exists()
                    .col(pk_auto(Installments::Id))
                    .col(integer(Installments::ProjectId))
                    .col(integer(Installments::Sequence))
                    .col(money(manager, Installments::Amount))
                    .col(date(Installments::DueDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_installment_project")
                            .from(Installments::Table, Installments::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create transactions table
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(pk_auto(Transactions::Id))
                    .col(integer(Transactions::ProjectId))
                    .col(money(manager, Transactions::Amount))
                    .col(integer_null(Transactions::InstallmentId))
                    .col(date_time(Transactions::RecordedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_project")
                            .from(Transactions::Table, Transactions::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_installment")
                            .from(Transactions::Table, Transactions::InstallmentId)
                            .to(Installments::Table, Installments::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_project_id")
                    .table(Transactions::Table)
                    .col(Transactions::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Create team_members table
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(pk_auto(TeamMembers::Id))
                    .col(string(TeamMembers::Name))
                    .col(string_null(TeamMembers::Email))
                    .to_owned(),
            )
            .await?;

        // Create project_team_members table (join table)
        manager
            .create_table(
                Table::create()
                    .table(ProjectTeamMembers::Table)
                    .if_not_exists()
                    .col(integer(ProjectTeamMembers::ProjectId))
                    .col(integer(ProjectTeamMembers::TeamMemberId))
                    .primary_key(
                        Index::create()
                            .name("pk_project_team_members")
                            .col(ProjectTeamMembers::ProjectId)
                            .col(ProjectTeamMembers::TeamMemberId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_team_members_project")
                            .from(ProjectTeamMembers::Table, ProjectTeamMembers::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_team_members_member")
                            .from(ProjectTeamMembers::Table, ProjectTeamMembers::TeamMemberId)
                            .to(TeamMembers::Table, TeamMembers::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(ProjectTeamMembers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Installments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Define identifiers for all tables

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Title,
    TotalBudget,
    PaymentType,
    CreatedBy,
}

#[derive(DeriveIden)]
enum Installments {
    Table,
    Id,
    ProjectId,
    Sequence,
    Amount,
    DueDate,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    ProjectId,
    Amount,
    InstallmentId,
    RecordedAt,
}

#[derive(DeriveIden)]
enum TeamMembers {
    Table,
    Id,
    Name,
    Email,
}

#[derive(DeriveIden)]
enum ProjectTeamMembers {
    Table,
    ProjectId,
    TeamMemberId,
}
