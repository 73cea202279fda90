use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use utoipa::ToSchema;

use quarkhub_core::model::{self, repository};

use crate::{
    app_state::SharedState,
    http_error::{ApiResult, HttpError},
    schema::{ApiResponse, Category, CategoryId},
};

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/slug/:slug", get(get_category_by_slug))
        .route(
            "/categories/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    /// lowercase letters, digits and hyphens
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub order: Option<i64>,
    pub is_active: Option<bool>,
}

impl From<CreateCategoryRequest> for model::NewCategory {
    fn from(value: CreateCategoryRequest) -> Self {
        model::NewCategory {
            name: value.name,
            slug: value.slug,
            description: value.description,
            icon: value.icon,
            color: value.color,
            parent_id: value.parent_id.map(Into::into),
            order: value.order,
            is_active: value.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub order: Option<i64>,
    pub is_active: Option<bool>,
}

impl From<UpdateCategoryRequest> for model::CategoryUpdate {
    fn from(value: UpdateCategoryRequest) -> Self {
        model::CategoryUpdate {
            name: value.name,
            slug: value.slug,
            description: value.description,
            icon: value.icon,
            color: value.color,
            parent_id: value.parent_id.map(Into::into),
            order: value.order,
            is_active: value.is_active,
        }
    }
}

#[utoipa::path(get, path = "/api/resources/categories",
    responses((status = 200, body = [Category])),
)]
#[tracing::instrument(skip(app_state))]
pub async fn list_categories(
    State(app_state): State<SharedState>,
) -> ApiResult<Json<ApiResponse<Vec<Category>>>> {
    let tx = app_state.store.begin().await;
    let categories = repository::category::get_categories(&tx);
    Ok(ApiResponse::ok(Category::from_models(&categories)))
}

#[utoipa::path(post, path = "/api/resources/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, body = Category),
        (status = 400, description = "Validation failed or slug already taken"),
    ),
)]
#[tracing::instrument(skip(app_state, request))]
pub async fn create_category(
    State(app_state): State<SharedState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateCategoryRequest>, HttpError>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let mut tx = app_state.store.begin().await;
    let created = repository::category::create_category(&mut tx, request.into())?;
    tx.commit().await?;
    Ok(ApiResponse::created(Category::from_model(&created)))
}

#[utoipa::path(get, path = "/api/resources/categories/{id}",
    responses(
        (status = 200, body = Category),
        (status = NOT_FOUND, description = "Category not found"),
    ),
    params(("id" = String, Path, description = "CategoryId")),
)]
#[tracing::instrument(skip(app_state))]
pub async fn get_category(
    Path(id): Path<String>,
    State(app_state): State<SharedState>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let tx = app_state.store.begin().await;
    let category = repository::category::get_category(&tx, &id)?;
    Ok(ApiResponse::ok(Category::from_model(&category)))
}

#[utoipa::path(get, path = "/api/resources/categories/slug/{slug}",
    responses(
        (status = 200, body = Category),
        (status = NOT_FOUND, description = "Category not found"),
    ),
    params(("slug" = String, Path, description = "Category slug")),
)]
#[tracing::instrument(skip(app_state))]
pub async fn get_category_by_slug(
    Path(slug): Path<String>,
    State(app_state): State<SharedState>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let tx = app_state.store.begin().await;
    let category = repository::category::get_category_by_slug(&tx, &slug)?;
    Ok(ApiResponse::ok(Category::from_model(&category)))
}

#[utoipa::path(put, path = "/api/resources/categories/{id}",
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, body = Category),
        (status = 400, description = "Validation failed or slug already taken"),
        (status = NOT_FOUND, description = "Category not found"),
    ),
    params(("id" = String, Path, description = "CategoryId")),
)]
#[tracing::instrument(skip(app_state, request))]
pub async fn update_category(
    Path(id): Path<String>,
    State(app_state): State<SharedState>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateCategoryRequest>, HttpError>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let mut tx = app_state.store.begin().await;
    let updated = repository::category::update_category(&mut tx, &id, request.into())?;
    tx.commit().await?;
    Ok(ApiResponse::ok(Category::from_model(&updated)))
}

#[utoipa::path(delete, path = "/api/resources/categories/{id}",
    responses(
        (status = 200, body = Category),
        (status = 400, description = "Category still has resources or child categories"),
        (status = NOT_FOUND, description = "Category not found"),
    ),
    params(("id" = String, Path, description = "CategoryId")),
)]
#[tracing::instrument(skip(app_state))]
pub async fn delete_category(
    Path(id): Path<String>,
    State(app_state): State<SharedState>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let mut tx = app_state.store.begin().await;
    let removed = repository::category::delete_category(&mut tx, &id)?;
    tx.commit().await?;
    Ok(ApiResponse::ok_with_message(
        Category::from_model(&removed),
        "category deleted",
    ))
}
