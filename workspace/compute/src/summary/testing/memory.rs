//! In-memory stores for driving the summary providers without a database.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::Notify;

use model::PaymentType;
use model::entities::{project, transaction};

use crate::error::{ComputeError, Result};
use crate::store::{ProjectStore, TransactionStore};

#[derive(Debug, Default)]
struct Tables {
    projects: BTreeMap<i32, project::Model>,
    transactions: Vec<transaction::Model>,
    next_transaction_id: i32,
}

/// Shared in-memory tables that count transaction reads.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    transaction_reads: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_project(&self, id: i32, owner_id: i32, budget: i64) -> project::Model {
        let project = project::Model {
            id,
            title: format!("Project {}", id),
            total_budget: Decimal::new(budget, 0).into(),
            payment_type: PaymentType::Fixed,
            created_by: owner_id,
        };
        self.tables
            .lock()
            .unwrap()
            .projects
            .insert(id, project.clone());
        project
    }

    pub fn set_budget(&self, project_id: i32, budget: i64) {
        let mut tables = self.tables.lock().unwrap();
        let project = tables.projects.get_mut(&project_id).unwrap();
        project.total_budget = Decimal::new(budget, 0).into();
    }

    pub fn push_transaction(&self, project: &project::Model, amount: i64) -> transaction::Model {
        let mut tables = self.tables.lock().unwrap();
        tables.next_transaction_id += 1;
        let transaction = transaction::Model {
            id: tables.next_transaction_id,
            project_id: project.id,
            amount: Decimal::new(amount, 0).into(),
            installment_id: None,
            recorded_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        };
        tables.transactions.push(transaction.clone());
        transaction
    }

    pub fn transaction_reads(&self) -> usize {
        self.transaction_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn get_by_id(&self, project_id: i32) -> Result<project::Model> {
        self.tables
            .lock()
            .unwrap()
            .projects
            .get(&project_id)
            .cloned()
            .ok_or_else(|| ComputeError::project_not_found(project_id))
    }

    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<project::Model>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .projects
            .values()
            .filter(|project| project.created_by == owner_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn list_by_project(&self, project_id: i32) -> Result<Vec<transaction::Model>> {
        self.transaction_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tables
            .lock()
            .unwrap()
            .transactions
            .iter()
            .filter(|transaction| transaction.project_id == project_id)
            .cloned()
            .collect())
    }
}

/// Wraps a [`MemoryStore`] so that one armed transaction read takes its
/// snapshot and then waits until [`GatedStore::release`] is called.
#[derive(Debug, Clone)]
pub struct GatedStore {
    inner: MemoryStore,
    armed: Arc<AtomicBool>,
    snapshot_taken: Arc<Notify>,
    gate: Arc<Notify>,
}

impl GatedStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            armed: Arc::new(AtomicBool::new(false)),
            snapshot_taken: Arc::new(Notify::new()),
            gate: Arc::new(Notify::new()),
        }
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Resolves once the armed read has taken its snapshot.
    pub async fn snapshot_taken(&self) {
        self.snapshot_taken.notified().await
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl ProjectStore for GatedStore {
    async fn get_by_id(&self, project_id: i32) -> Result<project::Model> {
        self.inner.get_by_id(project_id).await
    }

    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<project::Model>> {
        self.inner.list_by_owner(owner_id).await
    }
}

#[async_trait]
impl TransactionStore for GatedStore {
    async fn list_by_project(&self, project_id: i32) -> Result<Vec<transaction::Model>> {
        let snapshot = self.inner.list_by_project(project_id).await?;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.snapshot_taken.notify_one();
            self.gate.notified().await;
        }
        Ok(snapshot)
    }
}
