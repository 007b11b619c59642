//! User management endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, User},
};

/// List registered users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "Users in registration order", body = Vec<User>)
    )
)]
pub async fn list_users(State(state): State<crate::AppState>) -> Json<Vec<User>> {
    let catalog = state.services.catalog.read().await;
    Json(catalog.list_users().cloned().collect())
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Student id already registered")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateUser>, AppError>,
) -> AppResult<(StatusCode, Json<User>)> {
    request.validate()?;

    let mut catalog = state.services.catalog.write().await;
    let user = catalog.register_user(&request.name, &request.student_id)?;
    Ok((StatusCode::CREATED, Json(user.clone())))
}
