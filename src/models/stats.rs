//! Catalog statistics

use serde::Serialize;
use utoipa::ToSchema;

/// Number of entries in the popularity ranking
pub const TOP_BOOKS: usize = 3;

/// Summary counters over the whole catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogStats {
    pub books: usize,
    pub users: usize,
    /// Every loan ever recorded
    pub total_loans: usize,
    /// Loans not yet returned
    pub active_loans: usize,
    /// Most borrowed books, busiest first
    pub top_books: Vec<PopularBook>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PopularBook {
    pub isbn: String,
    /// Book title, or "unknown" once the book is removed
    pub title: String,
    pub loans: usize,
}
