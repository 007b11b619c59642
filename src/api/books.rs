//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateStock},
};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books in catalog order", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> Json<Vec<Book>> {
    let catalog = state.services.catalog.read().await;
    Json(catalog.list_books().cloned().collect())
}

/// Search books by ISBN, title or author
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> Json<Vec<Book>> {
    let catalog = state.services.catalog.read().await;

    let books: Vec<Book> = if let Some(isbn) = &query.isbn {
        catalog.search_by_isbn(isbn).cloned().into_iter().collect()
    } else if let Some(title) = &query.title {
        catalog.search_by_title(title).cloned().collect()
    } else if let Some(author) = &query.author {
        catalog.search_by_author(author).cloned().collect()
    } else {
        catalog.list_books().cloned().collect()
    };

    Json(books)
}

/// Get a book by ISBN
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<Book>> {
    let catalog = state.services.catalog.read().await;
    Ok(Json(catalog.get_book(&isbn)?.clone()))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "ISBN already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateBook>, AppError>,
) -> AppResult<(StatusCode, Json<Book>)> {
    request.validate()?;
    let stock = u32::try_from(request.stock)
        .map_err(|_| AppError::InvalidInput("Stock must not be negative".to_string()))?;

    let mut catalog = state.services.catalog.write().await;
    let book = catalog.add_book(&request.title, &request.author, &request.isbn, stock)?;
    Ok((StatusCode::CREATED, Json(book.clone())))
}

/// Set the available stock of a book
#[utoipa::path(
    put,
    path = "/books/{isbn}/stock",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    request_body = UpdateStock,
    responses(
        (status = 200, description = "Stock updated", body = Book),
        (status = 400, description = "Negative or malformed stock"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_stock(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateStock>, AppError>,
) -> AppResult<Json<Book>> {
    let mut catalog = state.services.catalog.write().await;
    let book = catalog.set_stock(&isbn, request.stock)?;
    Ok(Json(book.clone()))
}

/// Remove a book; its loan history is kept
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 204, description = "Book removed"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<StatusCode> {
    state.services.catalog.write().await.remove_book(&isbn)?;
    Ok(StatusCode::NO_CONTENT)
}
