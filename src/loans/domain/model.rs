use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, LoanStatus};
use crate::utils::date::{opt_serializer, serializer};

// TransactionEntity abstracts a single loan of one copy of a book to a member.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TransactionEntity {
    pub txn_id: String,
    pub member_id: String,
    pub isbn: String,
    #[serde(with = "serializer")]
    pub issued_on: NaiveDate,
    #[serde(with = "serializer")]
    pub due_on: NaiveDate,
    #[serde(with = "opt_serializer", default)]
    pub returned_on: Option<NaiveDate>,
    #[serde(default)]
    pub fine_paid: f64,
}

impl TransactionEntity {
    pub fn open(member_id: &str, isbn: &str, issued_on: NaiveDate, days: i64) -> LibraryResult<Self> {
        if days < 0 {
            return Err(LibraryError::invalid_argument(
                format!("loan period must not be negative, got {} days", days).as_str(), None));
        }
        let due_on = Duration::try_days(days)
            .and_then(|d| issued_on.checked_add_signed(d))
            .ok_or_else(|| LibraryError::invalid_argument(
                format!("loan period of {} days is out of range", days).as_str(), None))?;
        Ok(Self {
            txn_id: Uuid::new_v4().to_string(),
            member_id: member_id.to_string(),
            isbn: isbn.to_string(),
            issued_on,
            due_on,
            returned_on: None,
            fine_paid: 0.0,
        })
    }

    pub fn is_open(&self) -> bool {
        self.returned_on.is_none()
    }

    pub fn status(&self) -> LoanStatus {
        if self.is_open() {
            LoanStatus::Open
        } else {
            LoanStatus::Returned
        }
    }

    // whole calendar days past the due date as of `on`, never negative
    pub fn overdue_days(&self, on: NaiveDate) -> i64 {
        (on - self.due_on).num_days().max(0)
    }

    // open and past its due date as of `on`
    pub fn is_overdue(&self, on: NaiveDate) -> bool {
        self.is_open() && self.overdue_days(on) > 0
    }

    pub fn close(&mut self, returned_on: NaiveDate, fine: f64) {
        self.returned_on = Some(returned_on);
        self.fine_paid = fine;
    }
}

impl Identifiable for TransactionEntity {
    fn id(&self) -> String {
        self.txn_id.to_string()
    }
}
