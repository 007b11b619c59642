//! Loan management endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::loan::{LoanRecord, LoanRequest, LoanView},
};

use super::CurrentSession;

/// Borrow response with the calculated due date
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    pub isbn: String,
    /// Due date (ISO 8601 format)
    pub due_date: NaiveDate,
    /// Status message
    pub message: String,
}

/// Return response with the closed loan
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Return status
    pub status: String,
    pub loan: LoanRecord,
}

/// Borrow a book as the current reader
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = LoanRequest,
    responses(
        (status = 201, description = "Loan created", body = BorrowResponse),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book already borrowed by this reader"),
        (status = 422, description = "Book out of stock")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    current: CurrentSession,
    WithRejection(Json(request), _): WithRejection<Json<LoanRequest>, AppError>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    request.validate()?;

    let due_date = state
        .services
        .catalog
        .write()
        .await
        .borrow_book(&current.session, &request.isbn)?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            isbn: request.isbn,
            due_date,
            message: "Book borrowed successfully".to_string(),
        }),
    ))
}

/// Return a book borrowed by the current reader
#[utoipa::path(
    post,
    path = "/loans/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "No active loan for this book")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    current: CurrentSession,
    WithRejection(Json(request), _): WithRejection<Json<LoanRequest>, AppError>,
) -> AppResult<Json<ReturnResponse>> {
    request.validate()?;

    let mut catalog = state.services.catalog.write().await;
    let loan = catalog.return_book(&current.session, &request.isbn)?.clone();

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        loan,
    }))
}

/// Active loans of the current reader
#[utoipa::path(
    get,
    path = "/loans/me",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active loans, oldest first", body = Vec<LoanRecord>),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn my_loans(
    State(state): State<crate::AppState>,
    current: CurrentSession,
) -> AppResult<Json<Vec<LoanRecord>>> {
    let catalog = state.services.catalog.read().await;
    let loans: Vec<LoanRecord> = catalog
        .list_loans_for_current_user(&current.session)?
        .cloned()
        .collect();
    Ok(Json(loans))
}

/// Full loan history
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    responses(
        (status = 200, description = "Every loan ever recorded, oldest first", body = Vec<LoanView>)
    )
)]
pub async fn all_loans(State(state): State<crate::AppState>) -> Json<Vec<LoanView>> {
    let catalog = state.services.catalog.read().await;
    Json(catalog.all_loans().collect())
}
