use serde::Serialize;
use utoipa::ToSchema;

use quarkhub_core::{model, util::format_count};

use super::{CategoryId, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category_id: CategoryId,
    pub category_name: String,
    pub count: usize,
    pub views: String,
    pub downloads: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_resources: usize,
    pub total_categories: usize,
    pub total_views: u64,
    pub total_downloads: u64,
    pub category_stats: Vec<CategoryStats>,
    pub recent_uploads: Vec<Resource>,
    pub popular_resources: Vec<Resource>,
}

impl Stats {
    pub fn from_model(value: &model::ResourceStats) -> Stats {
        Stats {
            total_resources: value.total_resources,
            total_categories: value.total_categories,
            total_views: value.total_views,
            total_downloads: value.total_downloads,
            category_stats: value
                .category_stats
                .iter()
                .map(|c| CategoryStats {
                    category_id: (&c.category_id).into(),
                    category_name: c.category_name.clone(),
                    count: c.count,
                    views: format_count(c.views),
                    downloads: format_count(c.downloads),
                })
                .collect(),
            recent_uploads: Resource::from_models(&value.recent_uploads),
            popular_resources: Resource::from_models(&value.popular_resources),
        }
    }
}
