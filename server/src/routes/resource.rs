use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::{Query, WithRejection};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use quarkhub_core::{
    model::{self, repository},
    util::{deserialize_nullable, deserialize_opt_count},
};

use crate::{
    app_state::SharedState,
    http_error::{ApiResult, HttpError},
    schema::{ApiResponse, Resource, ResourceList, ResourceStatus, SortBy, SortOrder},
};

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_resources).post(create_resource))
        .route("/popular", get(get_popular))
        .route("/latest", get(get_latest))
        .route("/featured", get(get_featured))
        .route(
            "/:id",
            get(get_resource).put(update_resource).delete(delete_resource),
        )
        .route("/:id/views", post(post_view))
        .route("/:id/downloads", post(post_download))
        .route("/:id/related", get(get_related))
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ResourceQueryParams {
    pub category: Option<String>,
    /// case-insensitive match on title, description and tags
    pub search: Option<String>,
    pub year: Option<i32>,
    /// minimum rating
    pub rating: Option<f64>,
    pub status: Option<ResourceStatus>,
    pub featured: Option<bool>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    /// repeat to match any of several tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<ResourceQueryParams> for model::ResourceQuery {
    fn from(value: ResourceQueryParams) -> Self {
        model::ResourceQuery {
            category: value.category,
            tags: value.tags,
            year: value.year,
            rating: value.rating,
            search: value.search,
            status: value.status.map(Into::into),
            featured: value.featured,
            page: value.page,
            limit: value.limit,
            sort_by: value.sort_by.map(Into::into),
            sort_order: value.sort_order.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateResourceRequest {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub year: Option<i32>,
    pub episodes: Option<u32>,
    #[serde(deserialize_with = "deserialize_opt_count")]
    #[schema(value_type = Option<u64>)]
    pub views: Option<u64>,
    #[serde(deserialize_with = "deserialize_opt_count")]
    #[schema(value_type = Option<u64>)]
    pub downloads: Option<u64>,
    pub upload_date: Option<String>,
    pub tags: Vec<String>,
    pub file_size: Option<u64>,
    pub file_format: Option<String>,
    pub download_url: Option<String>,
    pub preview_url: Option<String>,
    pub status: Option<ResourceStatus>,
    pub featured: Option<bool>,
}

impl From<CreateResourceRequest> for model::NewResource {
    fn from(value: CreateResourceRequest) -> Self {
        model::NewResource {
            title: value.title,
            category: value.category,
            description: value.description,
            image: value.image,
            rating: value.rating,
            year: value.year,
            episodes: value.episodes,
            views: value.views,
            downloads: value.downloads,
            upload_date: value.upload_date,
            tags: value.tags,
            file_size: value.file_size,
            file_format: value.file_format,
            download_url: value.download_url,
            preview_url: value.preview_url,
            status: value.status.map(Into::into),
            featured: value.featured,
        }
    }
}

/// Fields left out are not changed, `null` clears an optional field.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub image: Option<Option<String>>,
    pub rating: Option<f64>,
    #[serde(deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<i32>, nullable)]
    pub year: Option<Option<i32>>,
    #[serde(deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<u32>, nullable)]
    pub episodes: Option<Option<u32>>,
    #[serde(deserialize_with = "deserialize_opt_count")]
    #[schema(value_type = Option<u64>)]
    pub views: Option<u64>,
    #[serde(deserialize_with = "deserialize_opt_count")]
    #[schema(value_type = Option<u64>)]
    pub downloads: Option<u64>,
    pub upload_date: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<u64>, nullable)]
    pub file_size: Option<Option<u64>>,
    #[serde(deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub file_format: Option<Option<String>>,
    #[serde(deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub download_url: Option<Option<String>>,
    #[serde(deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub preview_url: Option<Option<String>>,
    pub status: Option<ResourceStatus>,
    pub featured: Option<bool>,
}

impl From<UpdateResourceRequest> for model::ResourceUpdate {
    fn from(value: UpdateResourceRequest) -> Self {
        model::ResourceUpdate {
            title: value.title,
            category: value.category,
            description: value.description,
            image: value.image,
            rating: value.rating,
            year: value.year,
            episodes: value.episodes,
            views: value.views,
            downloads: value.downloads,
            upload_date: value.upload_date,
            tags: value.tags,
            file_size: value.file_size,
            file_format: value.file_format,
            download_url: value.download_url,
            preview_url: value.preview_url,
            status: value.status.map(Into::into),
            featured: value.featured,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitParams {
    pub limit: Option<usize>,
}

#[utoipa::path(get, path = "/api/resources",
    params(ResourceQueryParams),
    responses((status = 200, body = ResourceList)),
)]
#[tracing::instrument(skip(app_state))]
pub async fn list_resources(
    State(app_state): State<SharedState>,
    WithRejection(Query(params), _): WithRejection<Query<ResourceQueryParams>, HttpError>,
) -> ApiResult<Json<ApiResponse<ResourceList>>> {
    let tx = app_state.store.begin().await;
    let page = repository::query::query_resources(&tx, &params.into());
    Ok(ApiResponse::ok(ResourceList::from_model(&page)))
}

#[utoipa::path(post, path = "/api/resources",
    request_body = CreateResourceRequest,
    responses(
        (status = 201, body = Resource),
        (status = 400, description = "Validation failed or malformed body"),
    ),
)]
#[tracing::instrument(skip(app_state, request))]
pub async fn create_resource(
    State(app_state): State<SharedState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateResourceRequest>, HttpError>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Resource>>)> {
    let mut tx = app_state.store.begin().await;
    let created = repository::resource::create_resource(&mut tx, request.into())?;
    tx.commit().await?;
    Ok(ApiResponse::created(Resource::from_model(&created)))
}

#[utoipa::path(get, path = "/api/resources/{id}",
    responses(
        (status = 200, body = Resource),
        (status = NOT_FOUND, description = "Resource not found"),
    ),
    params(("id" = String, Path, description = "ResourceId")),
)]
#[tracing::instrument(skip(app_state))]
pub async fn get_resource(
    Path(id): Path<String>,
    State(app_state): State<SharedState>,
) -> ApiResult<Json<ApiResponse<Resource>>> {
    let tx = app_state.store.begin().await;
    let resource = repository::resource::get_resource(&tx, &id)?;
    Ok(ApiResponse::ok(Resource::from_model(&resource)))
}

#[utoipa::path(put, path = "/api/resources/{id}",
    request_body = UpdateResourceRequest,
    responses(
        (status = 200, body = Resource),
        (status = 400, description = "Validation failed or malformed body"),
        (status = NOT_FOUND, description = "Resource not found"),
    ),
    params(("id" = String, Path, description = "ResourceId")),
)]
#[tracing::instrument(skip(app_state, request))]
pub async fn update_resource(
    Path(id): Path<String>,
    State(app_state): State<SharedState>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateResourceRequest>, HttpError>,
) -> ApiResult<Json<ApiResponse<Resource>>> {
    let mut tx = app_state.store.begin().await;
    let updated = repository::resource::update_resource(&mut tx, &id, request.into())?;
    tx.commit().await?;
    Ok(ApiResponse::ok(Resource::from_model(&updated)))
}

#[utoipa::path(delete, path = "/api/resources/{id}",
    responses(
        (status = 200, body = Resource),
        (status = NOT_FOUND, description = "Resource not found"),
    ),
    params(("id" = String, Path, description = "ResourceId")),
)]
#[tracing::instrument(skip(app_state))]
pub async fn delete_resource(
    Path(id): Path<String>,
    State(app_state): State<SharedState>,
) -> ApiResult<Json<ApiResponse<Resource>>> {
    let mut tx = app_state.store.begin().await;
    let removed = repository::resource::delete_resource(&mut tx, &id)?;
    tx.commit().await?;
    Ok(ApiResponse::ok_with_message(
        Resource::from_model(&removed),
        "resource deleted",
    ))
}

async fn increment(
    app_state: &SharedState,
    id: &str,
    counter: repository::resource::Counter,
) -> ApiResult<Json<ApiResponse<Resource>>> {
    let mut tx = app_state.store.begin().await;
    let resource = repository::resource::increment_counter(&mut tx, id, counter)?;
    tx.commit().await?;
    Ok(ApiResponse::ok(Resource::from_model(&resource)))
}

#[utoipa::path(post, path = "/api/resources/{id}/views",
    responses(
        (status = 200, body = Resource),
        (status = NOT_FOUND, description = "Resource not found"),
    ),
    params(("id" = String, Path, description = "ResourceId")),
)]
#[tracing::instrument(skip(app_state), level = "debug")]
pub async fn post_view(
    Path(id): Path<String>,
    State(app_state): State<SharedState>,
) -> ApiResult<Json<ApiResponse<Resource>>> {
    increment(&app_state, &id, repository::resource::Counter::Views).await
}

#[utoipa::path(post, path = "/api/resources/{id}/downloads",
    responses(
        (status = 200, body = Resource),
        (status = NOT_FOUND, description = "Resource not found"),
    ),
    params(("id" = String, Path, description = "ResourceId")),
)]
#[tracing::instrument(skip(app_state), level = "debug")]
pub async fn post_download(
    Path(id): Path<String>,
    State(app_state): State<SharedState>,
) -> ApiResult<Json<ApiResponse<Resource>>> {
    increment(&app_state, &id, repository::resource::Counter::Downloads).await
}

#[utoipa::path(get, path = "/api/resources/{id}/related",
    responses(
        (status = 200, body = [Resource]),
        (status = NOT_FOUND, description = "Resource not found"),
    ),
    params(("id" = String, Path, description = "ResourceId"), LimitParams),
)]
#[tracing::instrument(skip(app_state))]
pub async fn get_related(
    Path(id): Path<String>,
    State(app_state): State<SharedState>,
    WithRejection(Query(params), _): WithRejection<Query<LimitParams>, HttpError>,
) -> ApiResult<Json<ApiResponse<Vec<Resource>>>> {
    let limit = params
        .limit
        .unwrap_or(repository::query::DEFAULT_RELATED_LIMIT);
    let tx = app_state.store.begin().await;
    let related = repository::query::related_resources(&tx, &id, limit)?;
    Ok(ApiResponse::ok(Resource::from_models(&related)))
}

#[utoipa::path(get, path = "/api/resources/popular",
    params(LimitParams),
    responses((status = 200, body = [Resource])),
)]
#[tracing::instrument(skip(app_state))]
pub async fn get_popular(
    State(app_state): State<SharedState>,
    WithRejection(Query(params), _): WithRejection<Query<LimitParams>, HttpError>,
) -> ApiResult<Json<ApiResponse<Vec<Resource>>>> {
    let limit = params.limit.unwrap_or(repository::query::DEFAULT_LIST_LIMIT);
    let tx = app_state.store.begin().await;
    let resources = repository::query::popular_resources(&tx, limit);
    Ok(ApiResponse::ok(Resource::from_models(&resources)))
}

#[utoipa::path(get, path = "/api/resources/latest",
    params(LimitParams),
    responses((status = 200, body = [Resource])),
)]
#[tracing::instrument(skip(app_state))]
pub async fn get_latest(
    State(app_state): State<SharedState>,
    WithRejection(Query(params), _): WithRejection<Query<LimitParams>, HttpError>,
) -> ApiResult<Json<ApiResponse<Vec<Resource>>>> {
    let limit = params.limit.unwrap_or(repository::query::DEFAULT_LIST_LIMIT);
    let tx = app_state.store.begin().await;
    let resources = repository::query::latest_resources(&tx, limit);
    Ok(ApiResponse::ok(Resource::from_models(&resources)))
}

#[utoipa::path(get, path = "/api/resources/featured",
    params(LimitParams),
    responses((status = 200, body = [Resource])),
)]
#[tracing::instrument(skip(app_state))]
pub async fn get_featured(
    State(app_state): State<SharedState>,
    WithRejection(Query(params), _): WithRejection<Query<LimitParams>, HttpError>,
) -> ApiResult<Json<ApiResponse<Vec<Resource>>>> {
    let limit = params.limit.unwrap_or(repository::query::DEFAULT_LIST_LIMIT);
    let tx = app_state.store.begin().await;
    let resources = repository::query::featured_resources(&tx, limit);
    Ok(ApiResponse::ok(Resource::from_models(&resources)))
}
