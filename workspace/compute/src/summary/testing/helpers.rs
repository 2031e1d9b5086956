use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, Set};

use migration::{Migrator, MigratorTrait};
use model::entities::{installment, project, team_member, transaction, user};
use model::PaymentType;

pub type Result<T> = std::result::Result<T, DbErr>;

pub async fn setup_db() -> Result<DatabaseConnection> {
    // Connect to the SQLite database
    let db = Database::connect("sqlite::memory:").await?;

    // Enable foreign keys
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

    Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn new_user(db: &DatabaseConnection) -> Result<user::Model> {
    static USER_ID: AtomicU64 = AtomicU64::new(0);

    let current_id = USER_ID.fetch_add(1, Ordering::SeqCst);
    user::ActiveModel {
        username: Set(format!("user_{}", current_id)),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_project(
    db: &DatabaseConnection,
    owner: &user::Model,
    budget: i64,
) -> Result<project::Model> {
    new_project_with_type(db, owner, budget, PaymentType::Fixed).await
}

pub async fn new_project_with_type(
    db: &DatabaseConnection,
    owner: &user::Model,
    budget: i64,
    payment_type: PaymentType,
) -> Result<project::Model> {
    project::ActiveModel {
        title: Set(format!("Project of {}", owner.username)),
        total_budget: Set(Decimal::new(budget * 100, 2).into()),
        payment_type: Set(payment_type),
        created_by: Set(owner.id),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_installment(
    db: &DatabaseConnection,
    project: &project::Model,
    sequence: i32,
    amount: i64,
) -> Result<installment::Model> {
    installment::ActiveModel {
        project_id: Set(project.id),
        sequence: Set(sequence),
        amount: Set(Decimal::new(amount * 100, 2).into()),
        due_date: Set(NaiveDate::from_ymd_opt(2024, sequence as u32, 1).unwrap()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_transaction(
    db: &DatabaseConnection,
    project: &project::Model,
    amount: i64,
) -> Result<transaction::Model> {
    transaction::ActiveModel {
        project_id: Set(project.id),
        amount: Set(Decimal::new(amount * 100, 2).into()),
        installment_id: Set(None),
        recorded_at: Set(NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_team_member(db: &DatabaseConnection, name: &str) -> Result<team_member::Model> {
    team_member::ActiveModel {
        name: Set(name.to_string()),
        email: Set(Some(format!("{}@example.com", name.to_lowercase()))),
        ..Default::default()
    }
    .insert(db)
    .await
}
