//! Loans repository

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::LoanRecord,
};

/// Append-only loan history in insertion order
#[derive(Debug, Default, Clone)]
pub struct LoansRepository {
    records: Vec<LoanRecord>,
}

impl LoansRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a new record and return it
    pub fn create(&mut self, record: LoanRecord) -> &LoanRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// First unreturned loan of `isbn` by `student_id`
    pub fn find_active(&self, student_id: &str, isbn: &str) -> Option<&LoanRecord> {
        self.records
            .iter()
            .find(|record| record.is_active_for(student_id, isbn))
    }

    /// Mark the first unreturned loan of `isbn` by `student_id` as returned
    pub fn return_loan(&mut self, student_id: &str, isbn: &str) -> AppResult<&LoanRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.is_active_for(student_id, isbn))
            .ok_or_else(|| {
                AppError::NoActiveLoan(format!(
                    "Student {} has no active loan for ISBN {}",
                    student_id, isbn
                ))
            })?;
        record.returned = true;
        Ok(&*record)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoanRecord> + Clone {
        self.records.iter()
    }

    /// Unreturned loans of one reader
    pub fn active_for<'a>(
        &'a self,
        student_id: &'a str,
    ) -> impl Iterator<Item = &'a LoanRecord> + Clone + 'a {
        self.records
            .iter()
            .filter(move |record| record.is_active() && record.student_id == student_id)
    }

    pub fn count_active(&self) -> usize {
        self.records.iter().filter(|record| record.is_active()).count()
    }

    /// Total loans per ISBN, keyed in order of first loan
    pub fn count_by_isbn(&self) -> IndexMap<&str, usize> {
        let mut counts = IndexMap::new();
        for record in &self.records {
            *counts.entry(record.isbn.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_return_marks_first_active_match() {
        let mut repo = LoansRepository::new();
        repo.create(LoanRecord::open("S1", "A", day(1)));
        repo.create(LoanRecord::open("S1", "A", day(2)));

        let returned = repo.return_loan("S1", "A").unwrap();
        assert_eq!(returned.borrow_date, day(1));
        assert!(returned.returned);

        assert_eq!(repo.find_active("S1", "A").unwrap().borrow_date, day(2));
        repo.return_loan("S1", "A").unwrap();
        assert!(matches!(
            repo.return_loan("S1", "A"),
            Err(AppError::NoActiveLoan(_))
        ));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_active_for_is_restartable() {
        let mut repo = LoansRepository::new();
        repo.create(LoanRecord::open("S1", "A", day(1)));
        repo.create(LoanRecord::open("S2", "A", day(1)));
        repo.create(LoanRecord::open("S1", "B", day(3)));
        repo.return_loan("S1", "A").unwrap();

        let active = repo.active_for("S1");
        let first: Vec<_> = active.clone().map(|r| r.isbn.as_str()).collect();
        let second: Vec<_> = active.map(|r| r.isbn.as_str()).collect();
        assert_eq!(first, vec!["B"]);
        assert_eq!(first, second);
        assert_eq!(repo.count_active(), 2);
    }

    #[test]
    fn test_count_by_isbn() {
        let mut repo = LoansRepository::new();
        for isbn in ["B", "A", "A", "B", "A"] {
            repo.create(LoanRecord::open("S1", isbn, day(1)));
        }
        let counts = repo.count_by_isbn();
        assert_eq!(counts.get("A"), Some(&3));
        assert_eq!(counts.get("B"), Some(&2));
        assert_eq!(counts.get_index(0), Some((&"B", &2)));
    }
}
