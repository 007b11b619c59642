//! Books repository

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::Book,
};

/// Catalog keyed by ISBN, iterated in insertion order
#[derive(Debug, Default, Clone)]
pub struct BooksRepository {
    books: IndexMap<String, Book>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn)
    }

    /// Get book by ISBN
    pub fn get_by_isbn(&self, isbn: &str) -> AppResult<&Book> {
        self.books
            .get(isbn)
            .ok_or_else(|| AppError::NotFound(format!("Book with ISBN {} not found", isbn)))
    }

    /// Insert a new book; the ISBN must not be catalogued yet
    pub fn create(&mut self, book: Book) -> AppResult<&Book> {
        if self.books.contains_key(&book.isbn) {
            return Err(AppError::DuplicateKey(format!(
                "A book with ISBN {} already exists",
                book.isbn
            )));
        }
        let (index, _) = self.books.insert_full(book.isbn.clone(), book);
        Ok(&self.books[index])
    }

    /// Remove a book, keeping the order of the remaining ones
    pub fn delete(&mut self, isbn: &str) -> AppResult<Book> {
        self.books
            .shift_remove(isbn)
            .ok_or_else(|| AppError::NotFound(format!("Book with ISBN {} not found", isbn)))
    }

    pub fn set_stock(&mut self, isbn: &str, stock: u32) -> AppResult<&Book> {
        let book = self.get_mut(isbn)?;
        book.stock = stock;
        Ok(&*book)
    }

    /// Take one copy off the shelf, returning the remaining stock
    pub fn take_copy(&mut self, isbn: &str) -> AppResult<u32> {
        let book = self.get_mut(isbn)?;
        if !book.is_available() {
            return Err(AppError::OutOfStock(format!(
                "No copies of \"{}\" are available",
                book.title
            )));
        }
        book.stock -= 1;
        Ok(book.stock)
    }

    /// Put one copy back, returning the new stock, or `None` if the book is gone.
    /// A stock already at `u32::MAX` is left as is and rejected.
    pub fn put_back_copy(&mut self, isbn: &str) -> AppResult<Option<u32>> {
        let Some(book) = self.books.get_mut(isbn) else {
            return Ok(None);
        };
        book.stock = book.stock.checked_add(1).ok_or_else(|| {
            AppError::InvalidInput(format!("Stock of \"{}\" cannot grow past {}", book.title, u32::MAX))
        })?;
        Ok(Some(book.stock))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> + Clone {
        self.books.values()
    }

    fn get_mut(&mut self, isbn: &str) -> AppResult<&mut Book> {
        self.books
            .get_mut(isbn)
            .ok_or_else(|| AppError::NotFound(format!("Book with ISBN {} not found", isbn)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> BooksRepository {
        let mut repo = BooksRepository::new();
        repo.create(Book::new("Dune", "Frank Herbert", "111", 2)).unwrap();
        repo.create(Book::new("Emma", "Jane Austen", "222", 0)).unwrap();
        repo.create(Book::new("Ulysses", "James Joyce", "333", 1)).unwrap();
        repo
    }

    #[test]
    fn test_create_rejects_duplicate_isbn() {
        let mut repo = repo();
        let err = repo.create(Book::new("Other", "Someone", "111", 9)).unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
        assert_eq!(repo.get("111").unwrap().title, "Dune");
        assert_eq!(repo.get("111").unwrap().stock, 2);
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn test_delete_keeps_insertion_order() {
        let mut repo = repo();
        repo.delete("222").unwrap();
        let isbns: Vec<_> = repo.iter().map(|b| b.isbn.as_str()).collect();
        assert_eq!(isbns, vec!["111", "333"]);
        assert!(matches!(repo.delete("222"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_take_copy_stops_at_zero() {
        let mut repo = repo();
        assert_eq!(repo.take_copy("333").unwrap(), 0);
        assert!(matches!(repo.take_copy("333"), Err(AppError::OutOfStock(_))));
        assert_eq!(repo.get("333").unwrap().stock, 0);
        assert!(matches!(repo.take_copy("999"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_put_back_copy() {
        let mut repo = repo();
        assert_eq!(repo.put_back_copy("222").unwrap(), Some(1));
        assert_eq!(repo.put_back_copy("999").unwrap(), None);
    }

    #[test]
    fn test_put_back_copy_at_max_stock() {
        let mut repo = repo();
        repo.set_stock("111", u32::MAX).unwrap();
        let err = repo.put_back_copy("111").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(repo.get("111").unwrap().stock, u32::MAX);
    }

    #[test]
    fn test_set_stock() {
        let mut repo = repo();
        assert_eq!(repo.set_stock("222", 7).unwrap().stock, 7);
        assert!(matches!(repo.set_stock("999", 1), Err(AppError::NotFound(_))));
    }
}
