//! Pure aggregation of a project's received money.
//!
//! Everything in here is synchronous and side-effect free apart from logging.
//! The input is trusted to be scoped to one project, but rows are still
//! collapsed by transaction id before summing: a query that joins the
//! transactions table against another one-to-many relation of the project
//! (installments, team assignments) repeats every transaction once per joined
//! row, and that must never leak into the totals.

use std::collections::HashSet;

use common::FinancialSummaryDto;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{instrument, trace, warn};

use model::entities::{project, transaction};

use crate::error::{ComputeError, Result};

/// The authoritative financial state of a single project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialSummary {
    pub project_id: i32,
    pub total_budget: Decimal,
    /// Sum of all distinct transactions of the project.
    pub received_amount: Decimal,
    /// `total_budget - received_amount`. Negative when the project is overpaid.
    pub remaining_amount: Decimal,
    /// `received_amount / total_budget * 100`, unrounded and unclamped.
    /// Zero for a zero budget.
    pub completion_percentage: Decimal,
    pub is_completed: bool,
    /// Number of distinct transactions that were summed.
    pub transaction_count: usize,
}

impl FinancialSummary {
    /// Completion percentage rounded to two decimal places, for display only.
    pub fn display_percentage(&self) -> Decimal {
        self.completion_percentage
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn is_overpaid(&self) -> bool {
        self.remaining_amount < Decimal::ZERO
    }
}

impl From<FinancialSummary> for FinancialSummaryDto {
    fn from(summary: FinancialSummary) -> Self {
        Self {
            project_id: summary.project_id,
            total_budget: summary.total_budget,
            received_amount: summary.received_amount,
            remaining_amount: summary.remaining_amount,
            completion_percentage: summary.display_percentage(),
            is_completed: summary.is_completed,
            is_overpaid: summary.is_overpaid(),
            transaction_count: summary.transaction_count,
        }
    }
}

/// Computes the financial summary of `project` from its transactions.
///
/// Rows sharing a transaction id are counted once (the first occurrence wins).
///
/// # Errors
/// [`ComputeError::InvalidInput`] when the budget is negative or a transaction
/// belongs to a different project.
#[instrument(skip(project, transactions), fields(project_id = project.id, rows = transactions.len()))]
pub fn summarize(
    project: &project::Model,
    transactions: &[transaction::Model],
) -> Result<FinancialSummary> {
    let total_budget = project.total_budget.into_inner();
    if total_budget < Decimal::ZERO {
        return Err(ComputeError::invalid_input(format!(
            "project {} has a negative budget of {}",
            project.id, total_budget
        )));
    }

    let mut seen = HashSet::with_capacity(transactions.len());
    let mut received_amount = Decimal::ZERO;
    let mut collapsed = 0usize;

    for transaction in transactions {
        if transaction.project_id != project.id {
            return Err(ComputeError::invalid_input(format!(
                "transaction {} belongs to project {}, not project {}",
                transaction.id, transaction.project_id, project.id
            )));
        }

        if !seen.insert(transaction.id) {
            collapsed += 1;
            continue;
        }

        received_amount = received_amount
            .checked_add(*transaction.amount)
            .ok_or_else(|| {
                ComputeError::invalid_input(format!(
                    "received amount of project {} overflows",
                    project.id
                ))
            })?;
    }

    if collapsed > 0 {
        warn!(
            project_id = project.id,
            collapsed, "Duplicate transaction rows collapsed before summing"
        );
    }

    let completion_percentage = completion_percentage(received_amount, total_budget)?;
    let summary = FinancialSummary {
        project_id: project.id,
        total_budget,
        received_amount,
        remaining_amount: total_budget - received_amount,
        completion_percentage,
        is_completed: received_amount >= total_budget,
        transaction_count: seen.len(),
    };

    trace!(?summary, "Financial summary computed");
    Ok(summary)
}

fn completion_percentage(received_amount: Decimal, total_budget: Decimal) -> Result<Decimal> {
    if total_budget <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    received_amount
        .checked_div(total_budget)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| ComputeError::invalid_input("completion percentage overflows"))
}
