//! Repository layer over the in-memory collections

pub mod books;
pub mod loans;
pub mod users;

/// All catalog collections; process-local, lost at shutdown
#[derive(Debug, Default, Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub users: users::UsersRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}
