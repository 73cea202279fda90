use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::{app_state::SharedState, openapi::ApiDoc};

pub mod batch;
pub mod category;
pub mod resource;
pub mod search;
pub mod stats;
pub mod transfer;

#[cfg(test)]
mod test;

/// Everything mounted under `/api/resources`. Static segments like `/stats` take precedence
/// over `/:id`.
pub fn resources_router() -> Router<SharedState> {
    Router::new()
        .merge(resource::router())
        .merge(category::router())
        .merge(search::router())
        .merge(stats::router())
        .merge(batch::router())
        .merge(transfer::router())
}

async fn get_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn api_router() -> Router<SharedState> {
    Router::new().route("/openapi.json", get(get_openapi))
}

/// The complete API without middleware layers.
pub fn app_router(state: SharedState) -> Router {
    Router::new()
        .nest("/api/resources", resources_router())
        .nest("/api", api_router())
        .with_state(state)
}
