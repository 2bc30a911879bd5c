use chrono::NaiveDate;
use crate::core::library::{LibraryError, LibraryResult};
use crate::loans::domain::model::TransactionEntity;

/// Flat per-day overdue fine.
///
/// The amount depends only on the due date and the date the copy comes back:
/// a loan returned on or before its due date costs nothing, every calendar
/// day after that costs `fine_per_day`. There is no cap and no rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinePolicy {
    fine_per_day: f64,
}

impl FinePolicy {
    pub fn new(fine_per_day: f64) -> LibraryResult<Self> {
        if !fine_per_day.is_finite() || fine_per_day < 0.0 {
            return Err(LibraryError::invalid_argument(
                format!("fine per day must be a non-negative amount, got {}", fine_per_day).as_str(), None));
        }
        Ok(Self { fine_per_day })
    }

    pub fn fine_per_day(&self) -> f64 {
        self.fine_per_day
    }

    pub fn fine_for(&self, due_on: NaiveDate, returned_on: NaiveDate) -> f64 {
        let overdue_days = (returned_on - due_on).num_days().max(0);
        overdue_days as f64 * self.fine_per_day
    }

    pub fn accrued(&self, txn: &TransactionEntity, on: NaiveDate) -> f64 {
        self.fine_for(txn.due_on, on)
    }
}
