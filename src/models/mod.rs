//! Data models for Lectern

pub mod book;
pub mod loan;
pub mod stats;
pub mod user;

// Re-export commonly used types
pub use book::Book;
pub use loan::{LoanRecord, LoanView};
pub use stats::{CatalogStats, PopularBook};
pub use user::{Session, User};

/// Placeholder shown for a loan whose book or reader no longer resolves
pub const UNKNOWN: &str = "unknown";
