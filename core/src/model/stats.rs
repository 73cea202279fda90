use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStats {
    pub total_resources: usize,
    pub total_categories: usize,
    pub total_views: u64,
    pub total_downloads: u64,
    pub category_stats: Vec<CategoryStats>,
    /// newest `upload_date` first
    pub recent_uploads: Vec<Resource>,
    /// most viewed first
    pub popular_resources: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category_id: CategoryId,
    pub category_name: String,
    pub count: usize,
    pub views: u64,
    pub downloads: u64,
}

/// What gets written to `stats.json` after a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    #[serde(flatten)]
    pub stats: ResourceStats,
    pub last_updated: DateTime<Utc>,
}
