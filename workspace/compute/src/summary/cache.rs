use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, trace};

use super::{FinancialSummary, SummaryProvider, summarize_project};
use crate::error::Result;
use crate::store::LedgerStore;

/// Cached state of one project.
#[derive(Debug, Default)]
struct Slot {
    /// Bumped by every invalidation of the project.
    generation: u64,
    summary: Option<FinancialSummary>,
}

type SharedSlot = Arc<Mutex<Slot>>;

/// A materialized view holding one [`FinancialSummary`] per project.
///
/// Every project owns a slot behind its own async mutex. Reads hold the lock
/// for the whole recompute and invalidations take the same lock, so an
/// invalidation issued while a recompute is running waits for it and then
/// throws its result away. Once [`SummaryProvider::invalidate`] returns, no
/// summary computed from older store state can be served.
///
/// Slots live in a bounded `moka` cache. A slot that is evicted or expires is
/// simply recreated empty by the next access.
pub struct SummaryProjectionCache<S> {
    store: S,
    slots: Cache<i32, SharedSlot>,
    recomputes: AtomicU64,
}

impl<S: LedgerStore> SummaryProjectionCache<S> {
    /// Creates a cache over `store`.
    ///
    /// # Arguments
    /// * `max_capacity` - Maximum number of projects kept in memory
    /// * `time_to_live` - How long a slot lives after it was created
    pub fn new(store: S, max_capacity: u64, time_to_live: Duration) -> Self {
        let slots = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(time_to_live)
            .build();

        Self {
            store,
            slots,
            recomputes: AtomicU64::new(0),
        }
    }

    /// Creates a cache with 1000 slots and a five minute time to live.
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, 1000, Duration::from_secs(300))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Invalidation counter of a resident slot. `None` when the project has
    /// no slot, e.g. it was never touched or the slot was evicted.
    pub async fn generation(&self, project_id: i32) -> Option<u64> {
        let slot = self.slots.get(&project_id).await?;
        let generation = slot.lock().await.generation;
        Some(generation)
    }

    /// Number of projects whose summary is currently materialized.
    pub async fn cached_entries(&self) -> usize {
        let slots: Vec<SharedSlot> = self.slots.iter().map(|(_, slot)| slot).collect();
        let mut filled = 0;
        for slot in slots {
            if slot.lock().await.summary.is_some() {
                filled += 1;
            }
        }
        filled
    }

    /// Number of times a summary was computed from the store.
    pub fn recomputes(&self) -> u64 {
        self.recomputes.load(Ordering::Relaxed)
    }

    /// Forgets every cached summary.
    pub async fn invalidate_all(&self) {
        self.slots.invalidate_all();
        self.slots.run_pending_tasks().await;
        info!("All cached summaries invalidated");
    }

    async fn slot(&self, project_id: i32) -> SharedSlot {
        self.slots
            .get_with(project_id, async { Arc::new(Mutex::new(Slot::default())) })
            .await
    }
}

#[async_trait]
impl<S: LedgerStore> SummaryProvider for SummaryProjectionCache<S> {
    #[instrument(skip(self))]
    async fn financial_summary(&self, project_id: i32) -> Result<FinancialSummary> {
        let slot = self.slot(project_id).await;
        let mut slot = slot.lock().await;

        if let Some(summary) = &slot.summary {
            trace!(generation = slot.generation, "Summary served from cache");
            return Ok(summary.clone());
        }

        let summary = summarize_project(&self.store, project_id).await?;
        self.recomputes.fetch_add(1, Ordering::Relaxed);
        debug!(generation = slot.generation, "Summary recomputed");

        slot.summary = Some(summary.clone());
        Ok(summary)
    }

    #[instrument(skip(self))]
    async fn summaries_for_owner(&self, owner_id: i32) -> Result<Vec<FinancialSummary>> {
        let projects = self.store.list_by_owner(owner_id).await?;
        let mut summaries = Vec::with_capacity(projects.len());
        for project in projects {
            summaries.push(self.financial_summary(project.id).await?);
        }
        Ok(summaries)
    }

    #[instrument(skip(self))]
    async fn invalidate(&self, project_id: i32) {
        let slot = self.slot(project_id).await;
        let mut slot = slot.lock().await;
        slot.generation += 1;
        slot.summary = None;
        debug!(generation = slot.generation, "Summary invalidated");
    }
}
