use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{FinancialSummary, SummaryProvider, summarize, summarize_project};
use crate::error::Result;
use crate::store::LedgerStore;

/// Recomputes every summary from the store on each request.
///
/// Invalidation is a no-op: there is nothing to go stale.
#[derive(Debug, Clone)]
pub struct OnDemandSummaries<S> {
    store: S,
}

impl<S: LedgerStore> OnDemandSummaries<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: LedgerStore> SummaryProvider for OnDemandSummaries<S> {
    #[instrument(skip(self))]
    async fn financial_summary(&self, project_id: i32) -> Result<FinancialSummary> {
        summarize_project(&self.store, project_id).await
    }

    #[instrument(skip(self))]
    async fn summaries_for_owner(&self, owner_id: i32) -> Result<Vec<FinancialSummary>> {
        let projects = self.store.list_by_owner(owner_id).await?;
        let mut summaries = Vec::with_capacity(projects.len());
        for project in &projects {
            let transactions = self.store.list_by_project(project.id).await?;
            summaries.push(summarize(project, &transactions)?);
        }
        Ok(summaries)
    }

    async fn invalidate(&self, project_id: i32) {
        debug!(project_id, "Nothing cached, invalidation skipped");
    }
}
