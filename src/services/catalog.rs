//! Catalog management service
//!
//! [`CatalogManager`] is the single authority over books, readers and loans.
//! Every stock change goes through it, so the borrow and return rules below
//! hold for all callers:
//!
//! - stock never drops below zero through a borrow;
//! - a reader holds at most one unreturned loan per ISBN;
//! - loan records are never deleted, and only ever move from active to
//!   returned.

use chrono::{Local, NaiveDate};

use crate::{
    error::{AppError, AppResult},
    models::{
        stats::TOP_BOOKS, Book, CatalogStats, LoanRecord, LoanView, PopularBook, Session, User,
        UNKNOWN,
    },
    repository::Repository,
};

#[derive(Debug, Default, Clone)]
pub struct CatalogManager {
    repository: Repository,
}

impl CatalogManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(repository: Repository) -> Self {
        Self { repository }
    }

    // ==================== Books ====================

    /// Add a new book; fails if the ISBN is already catalogued
    pub fn add_book(
        &mut self,
        title: &str,
        author: &str,
        isbn: &str,
        stock: u32,
    ) -> AppResult<&Book> {
        let book = self
            .repository
            .books
            .create(Book::new(title, author, isbn, stock))?;
        tracing::info!("Catalog: added \"{}\" (isbn={}, stock={})", book.title, book.isbn, book.stock);
        Ok(book)
    }

    /// Remove a book. Loan records that reference it are kept.
    pub fn remove_book(&mut self, isbn: &str) -> AppResult<Book> {
        let book = self.repository.books.delete(isbn)?;
        tracing::info!("Catalog: removed \"{}\" (isbn={})", book.title, book.isbn);
        Ok(book)
    }

    /// Overwrite the available stock of a book. Negative values are rejected.
    pub fn set_stock(&mut self, isbn: &str, new_stock: i64) -> AppResult<&Book> {
        let stock = u32::try_from(new_stock).map_err(|_| {
            AppError::InvalidInput(format!("Stock must be between 0 and {}", u32::MAX))
        })?;
        let book = self.repository.books.set_stock(isbn, stock)?;
        tracing::info!("Catalog: stock of \"{}\" set to {}", book.title, book.stock);
        Ok(book)
    }

    pub fn get_book(&self, isbn: &str) -> AppResult<&Book> {
        self.repository.books.get_by_isbn(isbn)
    }

    pub fn list_books(&self) -> impl Iterator<Item = &Book> + Clone {
        self.repository.books.iter()
    }

    // ==================== Users & session ====================

    pub fn register_user(&mut self, name: &str, student_id: &str) -> AppResult<&User> {
        let user = self.repository.users.create(User::new(name, student_id))?;
        tracing::info!("Users: registered {} (student_id={})", user.name, user.student_id);
        Ok(user)
    }

    pub fn list_users(&self) -> impl Iterator<Item = &User> + Clone {
        self.repository.users.iter()
    }

    /// Log `student_id` into `session`, replacing whoever was logged in.
    /// An unknown id leaves the session untouched.
    pub fn login(&self, session: &mut Session, student_id: &str) -> AppResult<User> {
        let user = self
            .repository
            .users
            .get_by_student_id(student_id)
            .inspect_err(|_| tracing::debug!("Session: login refused for unknown {}", student_id))?
            .clone();
        session.set(user.clone());
        tracing::debug!("Session: {} logged in", user.student_id);
        Ok(user)
    }

    pub fn logout(&self, session: &mut Session) {
        if let Some(user) = session.current() {
            tracing::debug!("Session: {} logged out", user.student_id);
        }
        session.clear();
    }

    pub fn current_user<'s>(&self, session: &'s Session) -> AppResult<&'s User> {
        session
            .current()
            .ok_or_else(|| AppError::NotAuthenticated("Please log in first".to_string()))
    }

    // ==================== Loans ====================

    /// Borrow a copy of `isbn` today; returns the due date
    pub fn borrow_book(&mut self, session: &Session, isbn: &str) -> AppResult<NaiveDate> {
        self.borrow_book_on(session, isbn, Local::now().date_naive())
    }

    /// Borrow a copy of `isbn` with `today` as the borrow date; returns the due date
    pub fn borrow_book_on(
        &mut self,
        session: &Session,
        isbn: &str,
        today: NaiveDate,
    ) -> AppResult<NaiveDate> {
        let user = self.current_user(session)?;

        let book = self
            .repository
            .books
            .get_by_isbn(isbn)
            .inspect_err(|_| tracing::debug!("Loans: {} refused, isbn={} not catalogued", user.student_id, isbn))?;
        if !book.is_available() {
            tracing::debug!("Loans: {} refused, \"{}\" is out of stock", user.student_id, book.title);
            return Err(AppError::OutOfStock(format!(
                "No copies of \"{}\" are available",
                book.title
            )));
        }

        if self.repository.loans.find_active(&user.student_id, isbn).is_some() {
            tracing::debug!("Loans: {} refused, \"{}\" already borrowed", user.student_id, book.title);
            return Err(AppError::DuplicateLoan(format!(
                "{} has already borrowed \"{}\"",
                user.student_id, book.title
            )));
        }

        let remaining = self.repository.books.take_copy(isbn)?;
        let record = self
            .repository
            .loans
            .create(LoanRecord::open(&user.student_id, isbn, today));

        tracing::info!(
            "Loans: {} borrowed isbn={} until {} ({} left)",
            record.student_id, record.isbn, record.due_date, remaining
        );
        Ok(record.due_date)
    }

    /// Return the reader's oldest active loan of `isbn` and restock the book.
    /// Nothing changes if the loan or the restock is rejected.
    pub fn return_book(&mut self, session: &Session, isbn: &str) -> AppResult<&LoanRecord> {
        let user = self.current_user(session)?;

        if self.repository.loans.find_active(&user.student_id, isbn).is_none() {
            tracing::debug!("Loans: {} has nothing to return for isbn={}", user.student_id, isbn);
            return Err(AppError::NoActiveLoan(format!(
                "Student {} has no active loan for ISBN {}",
                user.student_id, isbn
            )));
        }

        let restocked = self.repository.books.put_back_copy(isbn)?;
        let record = self.repository.loans.return_loan(&user.student_id, isbn)?;
        match restocked {
            Some(stock) => tracing::info!(
                "Loans: {} returned isbn={} (stock now {})",
                record.student_id, record.isbn, stock
            ),
            None => tracing::warn!(
                "Loans: {} returned isbn={} which is no longer catalogued",
                record.student_id, record.isbn
            ),
        }
        Ok(record)
    }

    /// Active loans of the logged-in reader, oldest first
    pub fn list_loans_for_current_user<'a>(
        &'a self,
        session: &'a Session,
    ) -> AppResult<impl Iterator<Item = &'a LoanRecord> + Clone + 'a> {
        let user = self.current_user(session)?;
        Ok(self.repository.loans.active_for(&user.student_id))
    }

    /// Full loan history, oldest first, resolved for display
    pub fn all_loans(&self) -> impl Iterator<Item = LoanView> + Clone + '_ {
        self.repository.loans.iter().map(move |record| self.resolve_loan(record))
    }

    fn resolve_loan(&self, record: &LoanRecord) -> LoanView {
        LoanView {
            student_id: record.student_id.clone(),
            user_name: self
                .repository
                .users
                .get(&record.student_id)
                .map_or_else(|| UNKNOWN.to_string(), |u| u.name.clone()),
            isbn: record.isbn.clone(),
            book_title: self.book_title(&record.isbn),
            borrow_date: record.borrow_date,
            due_date: record.due_date,
            returned: record.returned,
        }
    }

    fn book_title(&self, isbn: &str) -> String {
        self.repository
            .books
            .get(isbn)
            .map_or_else(|| UNKNOWN.to_string(), |b| b.title.clone())
    }

    // ==================== Search ====================

    /// Books whose title contains `keyword`, ignoring case
    pub fn search_by_title(&self, keyword: &str) -> impl Iterator<Item = &Book> + Clone + '_ {
        let keyword = keyword.to_lowercase();
        self.list_books()
            .filter(move |book| book.title.to_lowercase().contains(&keyword))
    }

    /// Books whose author contains `keyword`, ignoring case
    pub fn search_by_author(&self, keyword: &str) -> impl Iterator<Item = &Book> + Clone + '_ {
        let keyword = keyword.to_lowercase();
        self.list_books()
            .filter(move |book| book.author.to_lowercase().contains(&keyword))
    }

    pub fn search_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.repository.books.get(isbn)
    }

    // ==================== Statistics ====================

    pub fn statistics(&self) -> CatalogStats {
        let loans = &self.repository.loans;

        let mut counts: Vec<(&str, usize)> = loans.count_by_isbn().into_iter().collect();
        // busiest first, then ISBN ascending
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let top_books = counts
            .into_iter()
            .take(TOP_BOOKS)
            .map(|(isbn, count)| PopularBook {
                isbn: isbn.to_string(),
                title: self.book_title(isbn),
                loans: count,
            })
            .collect();

        CatalogStats {
            books: self.repository.books.len(),
            users: self.repository.users.len(),
            total_loans: loans.len(),
            active_loans: loans.count_active(),
            top_books,
        }
    }

    // ==================== Demo data ====================

    /// Load the demo shelf and reader
    pub fn seed_demo_data(&mut self) -> AppResult<()> {
        self.add_book("Thinking in Java", "Bruce Eckel", "978-7-115-123456", 3)?;
        self.add_book("Introduction to Algorithms", "Thomas Cormen", "978-7-115-789012", 2)?;
        self.add_book("Data Structures and Algorithms", "Yan Weimin", "978-7-115-345678", 1)?;
        self.register_user("Zhang San", "20230001")?;
        Ok(())
    }
}
