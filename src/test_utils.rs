#[cfg(test)]
pub mod test_utils {
    use crate::config::app_state_for;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use chrono::NaiveDate;
    use compute::SummaryMode;
    use migration::{Migrator, MigratorTrait};
    use model::PaymentType;
    use model::entities::{installment, project, team_member, transaction, user};
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use std::time::Duration;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing with the production (cached) summary provider
    pub async fn setup_test_app_state() -> AppState {
        setup_test_app_state_with_mode(SummaryMode::Cached {
            max_capacity: 100,
            time_to_live: Duration::from_secs(60),
        })
        .await
    }

    pub async fn setup_test_app_state_with_mode(mode: SummaryMode) -> AppState {
        let db = setup_test_db().await;
        app_state_for(db, mode)
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing together with its state, so tests can seed rows
    pub async fn setup_test_app() -> (Router, AppState) {
        let _guard = init_test_tracing();

        let state = setup_test_app_state().await;
        let router = create_router(state.clone());
        (router, state)
    }

    pub async fn seed_owner(db: &DatabaseConnection, username: &str) -> user::Model {
        user::ActiveModel {
            username: Set(username.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create owner")
    }

    pub async fn seed_project(
        db: &DatabaseConnection,
        owner: &user::Model,
        budget: Decimal,
        payment_type: PaymentType,
    ) -> project::Model {
        project::ActiveModel {
            title: Set(format!("{} project", owner.username)),
            total_budget: Set(budget.into()),
            payment_type: Set(payment_type),
            created_by: Set(owner.id),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create project")
    }

    pub async fn seed_installment(
        db: &DatabaseConnection,
        project: &project::Model,
        sequence: i32,
        amount: Decimal,
    ) -> installment::Model {
        installment::ActiveModel {
            project_id: Set(project.id),
            sequence: Set(sequence),
            amount: Set(amount.into()),
            due_date: Set(NaiveDate::from_ymd_opt(2024, sequence as u32, 15).unwrap()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create installment")
    }

    pub async fn seed_transaction(
        db: &DatabaseConnection,
        project: &project::Model,
        amount: Decimal,
    ) -> transaction::Model {
        transaction::ActiveModel {
            project_id: Set(project.id),
            amount: Set(amount.into()),
            installment_id: Set(None),
            recorded_at: Set(NaiveDate::from_ymd_opt(2024, 4, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create transaction")
    }

    pub async fn seed_team_member(db: &DatabaseConnection, name: &str) -> team_member::Model {
        team_member::ActiveModel {
            name: Set(name.to_string()),
            email: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create team member")
    }
}
