//! Common transport-layer types shared by the HTTP API and its clients.
//! Money travels as decimal strings so no precision is lost on the wire.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

// ===================== Summaries =====================

/// Financial summary of a project.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FinancialSummaryDto {
    pub project_id: i32,
    #[schema(value_type = String, example = "2500.00")]
    pub total_budget: Decimal,
    #[schema(value_type = String, example = "1500.00")]
    pub received_amount: Decimal,
    /// Negative when the client paid more than the budget.
    #[schema(value_type = String, example = "1000.00")]
    pub remaining_amount: Decimal,
    /// Rounded to two decimal places. Not capped at 100.
    #[schema(value_type = String, example = "60.00")]
    pub completion_percentage: Decimal,
    pub is_completed: bool,
    pub is_overpaid: bool,
    pub transaction_count: usize,
}

// ===================== Projects =====================

/// Request for changing the budget of a project.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpdateBudgetRequest {
    #[schema(value_type = String, example = "3000.00")]
    pub total_budget: Decimal,
}

// ===================== Transactions =====================

/// Request for recording a payment against a project.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateTransactionRequest {
    /// Must be positive
    #[schema(value_type = String, example = "500.00")]
    pub amount: Decimal,
    pub installment_id: Option<i32>,
    /// Defaults to the current time
    pub recorded_at: Option<NaiveDateTime>,
}

/// Request for editing a recorded payment. Omitted fields are kept.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct UpdateTransactionRequest {
    /// Moves the payment to another project
    pub project_id: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    /// Omitted keeps the link, `null` unlinks the payment from its installment
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i32>)]
    pub installment_id: Option<Option<i32>>,
    pub recorded_at: Option<NaiveDateTime>,
}

/// Keeps an explicit `null` apart from a missing field.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Transaction response model.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TransactionDto {
    pub id: i32,
    pub project_id: i32,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub installment_id: Option<i32>,
    pub recorded_at: NaiveDateTime,
}

// ===================== Team =====================

/// Request replacing the whole team of a project.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AssignTeamRequest {
    pub team_member_ids: Vec<i32>,
}

/// Current team of a project.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TeamAssignmentDto {
    pub project_id: i32,
    /// Sorted ascending
    pub team_member_ids: Vec<i32>,
    /// Members added by the request that produced this response
    #[serde(default)]
    pub added: Vec<i32>,
    /// Members removed by the request that produced this response
    #[serde(default)]
    pub removed: Vec<i32>,
}
