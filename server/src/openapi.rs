use utoipa::OpenApi;

use crate::{routes, schema};

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::resource::list_resources,
        routes::resource::create_resource,
        routes::resource::get_resource,
        routes::resource::update_resource,
        routes::resource::delete_resource,
        routes::resource::post_view,
        routes::resource::post_download,
        routes::resource::get_related,
        routes::resource::get_popular,
        routes::resource::get_latest,
        routes::resource::get_featured,
        routes::category::list_categories,
        routes::category::create_category,
        routes::category::get_category,
        routes::category::get_category_by_slug,
        routes::category::update_category,
        routes::category::delete_category,
        routes::search::search_resources,
        routes::stats::get_stats,
        routes::stats::refresh_stats,
        routes::batch::post_batch,
        routes::transfer::export_data,
        routes::transfer::import_data,
        routes::transfer::clear_data,
    ),
    components(schemas(
        schema::ResourceId,
        schema::CategoryId,
        schema::ResourceStatus,
        schema::SortBy,
        schema::SortOrder,
        schema::Resource,
        schema::ResourceList,
        schema::Category,
        schema::Stats,
        schema::CategoryStats,
        schema::ItemError,
        schema::BatchOutcome,
        schema::ImportOutcome,
        routes::resource::CreateResourceRequest,
        routes::resource::UpdateResourceRequest,
        routes::category::CreateCategoryRequest,
        routes::category::UpdateCategoryRequest,
        routes::batch::BatchAction,
        routes::batch::BatchRequest,
        routes::transfer::ExportFormat,
        routes::transfer::ImportRequest,
    )),
    tags((name = "quarkhub")),
)]
pub struct ApiDoc;

/// The API document with handler names turned into camelCase operation ids
/// (`get_resource` becomes `getResource`), the form generated clients expect.
pub fn client_openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    for operation in doc
        .paths
        .paths
        .values_mut()
        .flat_map(|item| item.operations.values_mut())
    {
        if let Some(id) = operation.operation_id.take() {
            operation.operation_id = Some(camel_case_id(&id));
        }
    }
    doc
}

fn camel_case_id(id: &str) -> String {
    id.split('_')
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(i, part)| {
            if i == 0 {
                return part.to_owned();
            }
            let mut chars = part.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect())
                .unwrap_or_default()
        })
        .collect()
}
