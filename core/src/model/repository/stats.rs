use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate};
use itertools::Itertools;
use tracing::instrument;

use crate::model::{Category, CategoryStats, Resource, ResourceStats};

use super::{db::write_stats_snapshot, StoreError, Transaction};

pub const TOP_N: usize = 10;

/// Milliseconds since epoch for an RFC 3339 timestamp or a plain `YYYY-MM-DD` date.
fn upload_timestamp(upload_date: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(upload_date) {
        return Some(dt.timestamp_millis());
    }
    NaiveDate::parse_from_str(upload_date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Aggregates over the full collections, nothing is cached between calls.
pub fn compute_stats(resources: &[Resource], categories: &[Category]) -> ResourceStats {
    let category_stats = categories
        .iter()
        .map(|category| {
            let (count, views, downloads) = resources
                .iter()
                .filter(|r| r.category == category.slug)
                .fold((0, 0u64, 0u64), |(count, views, downloads), r| {
                    (
                        count + 1,
                        views.saturating_add(r.views),
                        downloads.saturating_add(r.downloads),
                    )
                });
            CategoryStats {
                category_id: category.id.clone(),
                category_name: category.name.clone(),
                count,
                views,
                downloads,
            }
        })
        .collect();
    // undated resources sort last
    let recent_uploads = resources
        .iter()
        .sorted_by_key(|r| Reverse(upload_timestamp(&r.upload_date)))
        .take(TOP_N)
        .cloned()
        .collect();
    let popular_resources = resources
        .iter()
        .sorted_by_key(|r| Reverse(r.views))
        .take(TOP_N)
        .cloned()
        .collect();
    ResourceStats {
        total_resources: resources.len(),
        total_categories: categories.len(),
        total_views: resources
            .iter()
            .fold(0u64, |total, r| total.saturating_add(r.views)),
        total_downloads: resources
            .iter()
            .fold(0u64, |total, r| total.saturating_add(r.downloads)),
        category_stats,
        recent_uploads,
        popular_resources,
    }
}

#[instrument(skip(tx), level = "debug")]
pub fn get_stats(tx: &Transaction) -> ResourceStats {
    compute_stats(tx.resources(), tx.categories())
}

/// Recomputes stats and persists them to the stats document.
#[instrument(skip(tx))]
pub async fn refresh_stats(tx: &Transaction) -> Result<ResourceStats, StoreError> {
    write_stats_snapshot(tx.backend(), tx.resources(), tx.categories()).await?;
    Ok(get_stats(tx))
}

#[cfg(test)]
mod tests {
    use super::upload_timestamp;

    #[test]
    fn parses_dates_and_timestamps() {
        assert!(upload_timestamp("2024-03-01").is_some());
        assert!(upload_timestamp("2024-03-01T10:00:00.000Z").is_some());
        assert!(upload_timestamp("2024-03-01") < upload_timestamp("2024-03-02T00:00:01Z"));
        assert_eq!(upload_timestamp("yesterday"), None);
    }
}
