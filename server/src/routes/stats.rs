use axum::{extract::State, routing::get, Json, Router};

use quarkhub_core::model::repository;

use crate::{
    app_state::SharedState,
    http_error::ApiResult,
    schema::{ApiResponse, Stats},
};

pub fn router() -> Router<SharedState> {
    Router::new().route("/stats", get(get_stats).put(refresh_stats))
}

#[utoipa::path(get, path = "/api/resources/stats",
    responses((status = 200, body = Stats)),
)]
#[tracing::instrument(skip(app_state))]
pub async fn get_stats(
    State(app_state): State<SharedState>,
) -> ApiResult<Json<ApiResponse<Stats>>> {
    let tx = app_state.store.begin().await;
    let stats = repository::stats::get_stats(&tx);
    Ok(ApiResponse::ok(Stats::from_model(&stats)))
}

/// Recomputes the stats and writes them to the stats document.
#[utoipa::path(put, path = "/api/resources/stats",
    responses((status = 200, body = Stats)),
)]
#[tracing::instrument(skip(app_state))]
pub async fn refresh_stats(
    State(app_state): State<SharedState>,
) -> ApiResult<Json<ApiResponse<Stats>>> {
    let tx = app_state.store.begin().await;
    let stats = repository::stats::refresh_stats(&tx).await?;
    Ok(ApiResponse::ok(Stats::from_model(&stats)))
}
