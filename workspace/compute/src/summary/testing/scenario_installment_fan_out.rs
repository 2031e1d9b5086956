//! A project paid in installments.
//!
//! Three payments of 500 against a budget of 2500, with two installment rows.
//! Joining transactions against installments yields six rows; the summary must
//! still report 1500 received.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::DbErr;

use model::PaymentType;

use super::helpers::*;
use super::{ExpectedSummary, TestScenario, TestScenarioBuilder};
use crate::store::DbStore;

#[derive(Debug, Default)]
pub struct ScenarioInstallmentFanOut;

impl ScenarioInstallmentFanOut {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TestScenarioBuilder for ScenarioInstallmentFanOut {
    async fn get_scenario(&self) -> std::result::Result<TestScenario, DbErr> {
        let db = setup_db().await?;
        let owner = new_user(&db).await?;
        let project = new_project_with_type(&db, &owner, 2500, PaymentType::Installment).await?;

        new_installment(&db, &project, 1, 1250).await?;
        new_installment(&db, &project, 2, 1250).await?;

        for _ in 0..3 {
            new_transaction(&db, &project, 500).await?;
        }

        let expected = ExpectedSummary {
            received_amount: Decimal::new(1500, 0),
            remaining_amount: Decimal::new(1000, 0),
            completion_percentage: Decimal::new(60, 0),
            is_completed: false,
            transaction_count: 3,
        };

        Ok((DbStore::new(db), project, expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SummaryMode;
    use crate::store::ProjectStore;
    use crate::summary::summarize;
    use crate::summary::testing::run_and_assert_scenario;
    use model::entities::transaction;
    use sea_orm::{DbBackend, EntityTrait, Statement};

    #[tokio::test]
    async fn test_scenario_installment_fan_out() {
        run_and_assert_scenario(&ScenarioInstallmentFanOut::new(), SummaryMode::OnDemand)
            .await
            .expect("Failed to run fan-out scenario");
    }

    #[tokio::test]
    async fn test_joined_rows_do_not_inflate_totals() {
        let (store, project, expected) = ScenarioInstallmentFanOut::new()
            .get_scenario()
            .await
            .unwrap();

        let joined = transaction::Entity::find()
            .from_raw_sql(Statement::from_sql_and_values(
                DbBackend::Sqlite,
                "SELECT t.* FROM transactions t \
                 JOIN installments i ON i.project_id = t.project_id \
                 WHERE t.project_id = ?",
                [project.id.into()],
            ))
            .all(store.connection())
            .await
            .unwrap();
        assert_eq!(joined.len(), 6);

        let project = store.get_by_id(project.id).await.unwrap();
        let summary = summarize(&project, &joined).unwrap();
        assert_eq!(summary.received_amount, expected.received_amount);
        assert_eq!(summary.remaining_amount, expected.remaining_amount);
        assert_eq!(summary.transaction_count, 3);
    }
}
