//! Financial summaries of projects.
//!
//! [`aggregate::summarize`] is the single place where money is added up.
//! The [`SummaryProvider`] implementations decide when it runs: on every read
//! ([`OnDemandSummaries`]) or once per invalidation ([`SummaryProjectionCache`]).

pub mod aggregate;
pub mod cache;
pub mod on_demand;

#[cfg(test)]
pub mod testing;

pub use aggregate::{FinancialSummary, summarize};
pub use cache::SummaryProjectionCache;
pub use on_demand::OnDemandSummaries;

use async_trait::async_trait;
use tracing::instrument;

use crate::error::Result;
use crate::store::LedgerStore;

#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Returns the summary of the project as of the last acknowledged write.
    async fn financial_summary(&self, project_id: i32) -> Result<FinancialSummary>;

    /// Summaries of every project the user owns, ordered by project id.
    async fn summaries_for_owner(&self, owner_id: i32) -> Result<Vec<FinancialSummary>>;

    /// Drops whatever is known about the project. Returns once later reads
    /// are guaranteed to observe the current store state.
    async fn invalidate(&self, project_id: i32);

    async fn on_transaction_changed(&self, project_id: i32) {
        self.invalidate(project_id).await
    }

    async fn on_project_budget_changed(&self, project_id: i32) {
        self.invalidate(project_id).await
    }
}

/// Loads the project and its transactions and aggregates them.
#[instrument(skip(store))]
pub async fn summarize_project<S>(store: &S, project_id: i32) -> Result<FinancialSummary>
where
    S: LedgerStore + ?Sized,
{
    let project = store.get_by_id(project_id).await?;
    let transactions = store.list_by_project(project_id).await?;
    summarize(&project, &transactions)
}
