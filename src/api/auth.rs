//! Session endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{LoginRequest, User},
};

use super::CurrentSession;

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: Uuid,
    pub token_type: String,
    pub user: User,
}

/// Log a reader in by student id.
///
/// Sent with a live bearer token, the token is kept and now belongs to the new reader.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    security((), ("bearer_auth" = [])),
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 404, description = "Unknown student id")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    current: CurrentSession,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AppResult<Json<LoginResponse>> {
    request.validate()?;

    let (token, user) = state
        .services
        .login(&request.student_id, current.token.as_ref())
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        user,
    }))
}

/// Close the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Logged out")
    )
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    current: CurrentSession,
) -> StatusCode {
    if let Some(token) = current.token {
        state.services.logout(&token).await;
    }
    StatusCode::NO_CONTENT
}

/// Reader behind the current session
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current reader", body = User),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    current: CurrentSession,
) -> AppResult<Json<User>> {
    let catalog = state.services.catalog.read().await;
    let user = catalog.current_user(&current.session)?;
    Ok(Json(user.clone()))
}
