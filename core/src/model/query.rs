use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use super::{Resource, ResourceStatus};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortBy {
    Title,
    Rating,
    Year,
    UploadDate,
    Views,
    Downloads,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Filter, sort and page parameters for [`crate::model::repository::query::query_resources`].
///
/// A `year` or `rating` of zero does not filter, same as leaving it out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceQuery {
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub search: Option<String>,
    pub status: Option<ResourceStatus>,
    pub featured: Option<bool>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl ResourceQuery {
    pub fn sorted(sort_by: SortBy, sort_order: SortOrder) -> Self {
        ResourceQuery {
            sort_by: Some(sort_by),
            sort_order: Some(sort_order),
            ..Default::default()
        }
    }

    pub fn with_status(self, status: ResourceStatus) -> Self {
        ResourceQuery {
            status: Some(status),
            ..self
        }
    }

    pub fn with_limit(self, limit: usize) -> Self {
        ResourceQuery {
            limit: Some(limit),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePage {
    pub resources: Vec<Resource>,
    /// number of matches before pagination
    pub total: usize,
}
