//! Statistics endpoint

use axum::{extract::State, Json};

use crate::models::CatalogStats;

/// Catalog statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Catalog statistics", body = CatalogStats)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> Json<CatalogStats> {
    Json(state.services.catalog.read().await.statistics())
}
