//! A fixed price project paid in full with a single payment.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::DbErr;

use super::helpers::*;
use super::{ExpectedSummary, TestScenario, TestScenarioBuilder};
use crate::store::DbStore;

#[derive(Debug, Default)]
pub struct ScenarioExactPayment;

impl ScenarioExactPayment {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TestScenarioBuilder for ScenarioExactPayment {
    async fn get_scenario(&self) -> std::result::Result<TestScenario, DbErr> {
        let db = setup_db().await?;
        let owner = new_user(&db).await?;
        let project = new_project(&db, &owner, 1000).await?;

        new_transaction(&db, &project, 1000).await?;

        let expected = ExpectedSummary {
            received_amount: Decimal::new(1000, 0),
            remaining_amount: Decimal::ZERO,
            completion_percentage: Decimal::ONE_HUNDRED,
            is_completed: true,
            transaction_count: 1,
        };

        Ok((DbStore::new(db), project, expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SummaryMode;
    use crate::summary::testing::run_and_assert_scenario;

    #[tokio::test]
    async fn test_scenario_exact_payment() {
        let summary = run_and_assert_scenario(&ScenarioExactPayment::new(), SummaryMode::OnDemand)
            .await
            .expect("Failed to run exact payment scenario");
        assert_eq!(summary.display_percentage(), Decimal::new(10000, 2));
    }
}
