//! Book model and related types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Catalog entry, keyed by ISBN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub isbn: String,
    /// Copies currently available for loan
    pub stock: u32,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        stock: u32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            stock,
        }
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    /// Initial stock; negative values are rejected
    pub stock: i64,
}

/// Stock update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStock {
    pub stock: i64,
}

/// Book search filters; the first one present wins (isbn, then title, then author)
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive title keyword
    pub title: Option<String>,
    /// Case-insensitive author keyword
    pub author: Option<String>,
    /// Exact ISBN
    pub isbn: Option<String>,
}
