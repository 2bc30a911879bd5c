use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::core::library::LoanStatus;
use crate::loans::domain::model::TransactionEntity;
use crate::utils::date::{opt_serializer, serializer};

// TransactionDto is the read-only view of a loan handed to the presentation layer
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TransactionDto {
    pub txn_id: String,
    pub member_id: String,
    pub isbn: String,
    pub status: LoanStatus,
    #[serde(with = "serializer")]
    pub issued_on: NaiveDate,
    #[serde(with = "serializer")]
    pub due_on: NaiveDate,
    #[serde(with = "opt_serializer", default)]
    pub returned_on: Option<NaiveDate>,
    pub fine_paid: f64,
}

// OverdueLoanDto is an open loan past its due date, with the fine it would cost today
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct OverdueLoanDto {
    pub transaction: TransactionDto,
    pub overdue_days: i64,
    pub accrued_fine: f64,
}

impl From<&TransactionEntity> for TransactionDto {
    fn from(other: &TransactionEntity) -> Self {
        Self {
            txn_id: other.txn_id.to_string(),
            member_id: other.member_id.to_string(),
            isbn: other.isbn.to_string(),
            status: other.status(),
            issued_on: other.issued_on,
            due_on: other.due_on,
            returned_on: other.returned_on,
            fine_paid: other.fine_paid,
        }
    }
}
