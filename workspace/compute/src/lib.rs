pub mod error;
pub mod store;
pub mod summary;
pub mod team;

pub use store::{DbStore, LedgerStore, ProjectStore, TeamAssignmentStore, TransactionStore};
pub use summary::{
    FinancialSummary, OnDemandSummaries, SummaryProjectionCache, SummaryProvider, summarize,
    summarize_project,
};
pub use team::AssignmentChange;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

/// How project summaries are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryMode {
    /// Recompute on every read.
    OnDemand,
    /// Keep a materialized summary per project until it is invalidated.
    Cached {
        max_capacity: u64,
        time_to_live: Duration,
    },
}

impl Default for SummaryMode {
    fn default() -> Self {
        SummaryMode::Cached {
            max_capacity: 1000,
            time_to_live: Duration::from_secs(300),
        }
    }
}

/// Returns the summary provider the server uses for the given mode.
pub fn default_summaries(store: DbStore, mode: SummaryMode) -> Arc<dyn SummaryProvider> {
    match mode {
        SummaryMode::OnDemand => {
            info!("Financial summaries are computed on demand");
            Arc::new(OnDemandSummaries::new(store))
        }
        SummaryMode::Cached {
            max_capacity,
            time_to_live,
        } => {
            info!(
                max_capacity,
                ttl_secs = time_to_live.as_secs(),
                "Financial summaries are cached per project"
            );
            Arc::new(SummaryProjectionCache::new(store, max_capacity, time_to_live))
        }
    }
}
