//! API handlers for Lectern REST endpoints

pub mod auth;
pub mod books;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod stats;
pub mod users;

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post, put},
    Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::{models::Session, AppState};

/// Session of the caller, resolved from the `Authorization: Bearer` token.
///
/// A missing, malformed or closed token yields a logged-out session; the
/// catalog decides whether the operation needs one.
pub struct CurrentSession {
    pub token: Option<Uuid>,
    pub session: Session,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = Option::<TypedHeader<Authorization<Bearer>>>::from_request_parts(parts, state)
            .await
            .ok()
            .flatten()
            .and_then(|TypedHeader(auth)| Uuid::parse_str(auth.token()).ok());

        let session = state.services.session(token.as_ref()).await;
        Ok(Self { token, session })
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        // Books (catalog)
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/search", get(books::search_books))
        .route("/books/:isbn", get(books::get_book).delete(books::delete_book))
        .route("/books/:isbn/stock", put(books::update_stock))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        // Loans
        .route("/loans", get(loans::all_loans).post(loans::borrow_book))
        .route("/loans/me", get(loans::my_loans))
        .route("/loans/return", post(loans::return_book))
        // Statistics
        .route("/stats", get(stats::get_stats))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
