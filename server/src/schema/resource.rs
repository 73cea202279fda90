use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use quarkhub_core::{model, util::format_count};

use super::ResourceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Active,
    Inactive,
    Pending,
}

impl From<model::ResourceStatus> for ResourceStatus {
    fn from(value: model::ResourceStatus) -> Self {
        match value {
            model::ResourceStatus::Active => ResourceStatus::Active,
            model::ResourceStatus::Inactive => ResourceStatus::Inactive,
            model::ResourceStatus::Pending => ResourceStatus::Pending,
        }
    }
}

impl From<ResourceStatus> for model::ResourceStatus {
    fn from(value: ResourceStatus) -> Self {
        match value {
            ResourceStatus::Active => model::ResourceStatus::Active,
            ResourceStatus::Inactive => model::ResourceStatus::Inactive,
            ResourceStatus::Pending => model::ResourceStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Title,
    Rating,
    Year,
    UploadDate,
    Views,
    Downloads,
}

impl From<SortBy> for model::SortBy {
    fn from(value: SortBy) -> Self {
        match value {
            SortBy::Title => model::SortBy::Title,
            SortBy::Rating => model::SortBy::Rating,
            SortBy::Year => model::SortBy::Year,
            SortBy::UploadDate => model::SortBy::UploadDate,
            SortBy::Views => model::SortBy::Views,
            SortBy::Downloads => model::SortBy::Downloads,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl From<SortOrder> for model::SortOrder {
    fn from(value: SortOrder) -> Self {
        match value {
            SortOrder::Asc => model::SortOrder::Asc,
            SortOrder::Desc => model::SortOrder::Desc,
        }
    }
}

/// Resource as served over HTTP. Counters are rendered for display, e.g. `"1.2k"`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes: Option<u32>,
    pub views: String,
    pub downloads: String,
    pub upload_date: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    pub status: ResourceStatus,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    pub fn from_model(value: &model::Resource) -> Resource {
        Resource {
            id: (&value.id).into(),
            title: value.title.clone(),
            category: value.category.clone(),
            description: value.description.clone(),
            image: value.image.clone(),
            rating: value.rating,
            year: value.year,
            episodes: value.episodes,
            views: format_count(value.views),
            downloads: format_count(value.downloads),
            upload_date: value.upload_date.clone(),
            tags: value.tags.clone(),
            file_size: value.file_size,
            file_format: value.file_format.clone(),
            download_url: value.download_url.clone(),
            preview_url: value.preview_url.clone(),
            status: value.status.into(),
            featured: value.featured,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }

    pub fn from_models(values: &[model::Resource]) -> Vec<Resource> {
        values.iter().map(Resource::from_model).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList {
    pub resources: Vec<Resource>,
    /// matches before pagination
    pub total: usize,
}

impl ResourceList {
    pub fn from_model(value: &model::ResourcePage) -> ResourceList {
        ResourceList {
            resources: Resource::from_models(&value.resources),
            total: value.total,
        }
    }
}
