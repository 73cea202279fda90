use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use utoipa::ToSchema;

use quarkhub_core::model::{self, repository};

use crate::{
    app_state::SharedState,
    http_error::{ApiResult, HttpError},
    schema::{ApiResponse, BatchOutcome},
};

pub fn router() -> Router<SharedState> {
    Router::new().route("/batch", post(post_batch))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BatchAction {
    Delete,
    Update,
    Activate,
    Deactivate,
}

impl From<BatchAction> for model::BatchAction {
    fn from(value: BatchAction) -> Self {
        match value {
            BatchAction::Delete => model::BatchAction::Delete,
            BatchAction::Update => model::BatchAction::Update,
            BatchAction::Activate => model::BatchAction::Activate,
            BatchAction::Deactivate => model::BatchAction::Deactivate,
        }
    }
}

/// `activate` and `deactivate` only apply to resources.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub action: BatchAction,
    #[serde(default)]
    pub resource_ids: Vec<String>,
    #[serde(default)]
    pub category_ids: Vec<String>,
    /// partial update for `update`
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    /// apply nothing unless every id succeeds
    #[serde(default)]
    pub atomic: bool,
}

impl From<BatchRequest> for model::BatchOperation {
    fn from(value: BatchRequest) -> Self {
        model::BatchOperation {
            action: value.action.into(),
            resource_ids: value.resource_ids,
            category_ids: value.category_ids,
            data: value.data,
            atomic: value.atomic,
        }
    }
}

#[utoipa::path(post, path = "/api/resources/batch",
    request_body = BatchRequest,
    responses(
        (
            status = 200,
            body = BatchOutcome,
            description = "Per id results, also when some ids failed"
        ),
        (status = 400, description = "Malformed body or update data"),
    ),
)]
#[tracing::instrument(skip(app_state))]
pub async fn post_batch(
    State(app_state): State<SharedState>,
    WithRejection(Json(request), _): WithRejection<Json<BatchRequest>, HttpError>,
) -> ApiResult<Json<ApiResponse<BatchOutcome>>> {
    let operation: model::BatchOperation = request.into();
    let outcome = repository::batch::batch_operation(&app_state.store, &operation).await?;
    Ok(ApiResponse::ok(BatchOutcome::from_model(&outcome)))
}
