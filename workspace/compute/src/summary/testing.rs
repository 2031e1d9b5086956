pub mod helpers;
pub mod memory;
pub mod scenario_exact_payment;
pub mod scenario_installment_fan_out;

pub use scenario_exact_payment::ScenarioExactPayment;
pub use scenario_installment_fan_out::ScenarioInstallmentFanOut;
pub use scenario_overpayment::ScenarioOverpayment;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::DbErr;

use crate::error::Result as ComputeResult;
use crate::store::DbStore;
use crate::{SummaryMode, default_summaries};
use model::entities::project;

use super::FinancialSummary;

/// What a scenario expects the summary of its project to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedSummary {
    pub received_amount: Decimal,
    pub remaining_amount: Decimal,
    pub completion_percentage: Decimal,
    pub is_completed: bool,
    pub transaction_count: usize,
}

/// Prepared test scenario: the store, the project under test and its expected summary.
pub type TestScenario = (DbStore, project::Model, ExpectedSummary);

/// Trait for building test scenarios.
#[async_trait]
pub trait TestScenarioBuilder: Send + Sync {
    async fn get_scenario(&self) -> Result<TestScenario, DbErr>;
}

/// Builds the scenario, summarizes its project through a provider created for
/// `mode` and asserts the result. Reads twice so cached providers are checked
/// on the hit path as well.
pub async fn run_and_assert_scenario(
    builder: &dyn TestScenarioBuilder,
    mode: SummaryMode,
) -> ComputeResult<FinancialSummary> {
    let (store, project, expected) = builder.get_scenario().await?;
    let summaries = default_summaries(store, mode);

    let summary = summaries.financial_summary(project.id).await?;
    assert_eq!(summary.project_id, project.id);
    assert_eq!(project.total_budget, summary.total_budget);
    assert_eq!(summary.received_amount, expected.received_amount);
    assert_eq!(summary.remaining_amount, expected.remaining_amount);
    assert_eq!(summary.completion_percentage, expected.completion_percentage);
    assert_eq!(summary.is_completed, expected.is_completed);
    assert_eq!(summary.transaction_count, expected.transaction_count);

    let again = summaries.financial_summary(project.id).await?;
    assert_eq!(summary, again);

    Ok(summary)
}
