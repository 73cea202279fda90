use axum::{extract::State, routing::get, Json, Router};
use axum_extra::extract::{Query, WithRejection};
use serde::Deserialize;
use utoipa::IntoParams;

use quarkhub_core::model::{self, repository};

use crate::{
    app_state::SharedState,
    http_error::{ApiResult, HttpError},
    schema::{ApiResponse, ResourceList, SortBy, SortOrder},
};

pub const DEFAULT_SEARCH_LIMIT: usize = 20;

pub fn router() -> Router<SharedState> {
    Router::new().route("/search", get(search_resources))
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// search text, required
    pub q: Option<String>,
    pub category: Option<String>,
    /// comma separated, matches any
    pub tags: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl SearchParams {
    fn into_query(self, search: String) -> model::ResourceQuery {
        model::ResourceQuery {
            search: Some(search),
            category: self.category.filter(|c| !c.is_empty()),
            tags: self
                .tags
                .map(|tags| {
                    tags.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
            page: Some(self.page.unwrap_or(1)),
            limit: Some(self.limit.unwrap_or(DEFAULT_SEARCH_LIMIT)),
            sort_by: Some(self.sort_by.unwrap_or(SortBy::UploadDate).into()),
            sort_order: Some(self.sort_order.unwrap_or(SortOrder::Desc).into()),
            ..Default::default()
        }
    }
}

#[utoipa::path(get, path = "/api/resources/search",
    params(SearchParams),
    responses(
        (status = 200, body = ResourceList),
        (status = 400, description = "Empty search text"),
    ),
)]
#[tracing::instrument(skip(app_state))]
pub async fn search_resources(
    State(app_state): State<SharedState>,
    WithRejection(Query(params), _): WithRejection<Query<SearchParams>, HttpError>,
) -> ApiResult<Json<ApiResponse<ResourceList>>> {
    let search = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_owned(),
        _ => return Err(HttpError::bad_request("search text must not be empty")),
    };
    let query = params.into_query(search);
    let tx = app_state.store.begin().await;
    let page = repository::query::query_resources(&tx, &query);
    Ok(ApiResponse::ok(ResourceList::from_model(&page)))
}
