//! Loan (borrow) model and related types

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Loan period applied to every new record
pub const LOAN_DURATION_DAYS: i64 = 30;

/// Permanent history entry joining a reader and a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoanRecord {
    pub student_id: String,
    pub isbn: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned: bool,
}

impl LoanRecord {
    /// Open a loan starting on `borrow_date`
    pub fn open(student_id: impl Into<String>, isbn: impl Into<String>, borrow_date: NaiveDate) -> Self {
        Self {
            student_id: student_id.into(),
            isbn: isbn.into(),
            borrow_date,
            due_date: borrow_date + Duration::days(LOAN_DURATION_DAYS),
            returned: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.returned
    }

    /// Whether this is an unreturned loan of `isbn` by `student_id`
    pub fn is_active_for(&self, student_id: &str, isbn: &str) -> bool {
        self.is_active() && self.student_id == student_id && self.isbn == isbn
    }
}

/// Loan history entry resolved against the catalog for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LoanView {
    pub student_id: String,
    /// Reader name, or "unknown"
    pub user_name: String,
    pub isbn: String,
    /// Book title, or "unknown" once the book is removed
    pub book_title: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned: bool,
}

/// Borrow or return request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoanRequest {
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
}
