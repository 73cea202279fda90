use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::{Query, WithRejection};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use quarkhub_core::{
    model::{self, repository},
    util::today,
};

use crate::{
    app_state::SharedState,
    http_error::{ApiResult, HttpError},
    schema::{ApiResponse, ImportOutcome},
};

use super::{category::CreateCategoryRequest, resource::CreateResourceRequest};

pub fn router() -> Router<SharedState> {
    Router::new().route(
        "/import-export",
        get(export_data).post(import_data).delete(clear_data),
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl From<ExportFormat> for model::ExportFormat {
    fn from(value: ExportFormat) -> Self {
        match value {
            ExportFormat::Json => model::ExportFormat::Json,
            ExportFormat::Csv => model::ExportFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportParams {
    pub format: Option<ExportFormat>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub resources: Option<Vec<CreateResourceRequest>>,
    pub categories: Option<Vec<CreateCategoryRequest>>,
    /// reject the whole import if any item fails
    #[serde(default)]
    pub atomic: bool,
}

impl From<ImportRequest> for model::ImportData {
    fn from(value: ImportRequest) -> Self {
        model::ImportData {
            resources: value
                .resources
                .map(|resources| resources.into_iter().map(Into::into).collect()),
            categories: value
                .categories
                .map(|categories| categories.into_iter().map(Into::into).collect()),
            atomic: value.atomic,
        }
    }
}

/// Full dump of resources and categories, as a download.
#[utoipa::path(get, path = "/api/resources/import-export",
    params(ExportParams),
    responses(
        (status = 200, description = "Export file", content(
            ("application/json" = String),
            ("text/csv" = String),
        )),
    ),
)]
#[tracing::instrument(skip(app_state))]
pub async fn export_data(
    State(app_state): State<SharedState>,
    WithRejection(Query(params), _): WithRejection<Query<ExportParams>, HttpError>,
) -> ApiResult<Response> {
    let format: model::ExportFormat = params.format.unwrap_or_default().into();
    let data = {
        let tx = app_state.store.begin().await;
        repository::transfer::export_data(&tx)
    };
    let body = match format {
        model::ExportFormat::Json => serde_json::to_string_pretty(&data)?,
        model::ExportFormat::Csv => repository::transfer::export_csv(&data).await?,
    };
    let disposition = format!(
        "attachment; filename=\"resources_export_{}.{}\"",
        today(),
        format.as_ref()
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

#[utoipa::path(post, path = "/api/resources/import-export",
    request_body = ImportRequest,
    responses(
        (status = 201, body = ImportOutcome),
        (
            status = 400,
            description = "Neither resources nor categories given, or an atomic import failed"
        ),
    ),
)]
#[tracing::instrument(skip(app_state, request))]
pub async fn import_data(
    State(app_state): State<SharedState>,
    WithRejection(Json(request), _): WithRejection<Json<ImportRequest>, HttpError>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ImportOutcome>>)> {
    let outcome = repository::transfer::import_data(&app_state.store, request.into()).await?;
    Ok(ApiResponse::created(ImportOutcome::from_model(&outcome)))
}

/// Deletes every resource and restores the default categories.
#[utoipa::path(delete, path = "/api/resources/import-export",
    responses((status = 200, description = "All data cleared")),
)]
#[tracing::instrument(skip(app_state))]
pub async fn clear_data(
    State(app_state): State<SharedState>,
) -> ApiResult<Json<ApiResponse<()>>> {
    repository::transfer::clear_all(&app_state.store).await?;
    Ok(ApiResponse::message("all data cleared"))
}
