use std::cmp::Ordering;

use tracing::instrument;

use crate::model::{
    Resource, ResourcePage, ResourceQuery, ResourceStatus, SortBy, SortOrder,
};

use super::{resource::get_resource, StoreError, Transaction};

pub const DEFAULT_LIST_LIMIT: usize = 10;
pub const DEFAULT_RELATED_LIMIT: usize = 5;

fn matches_filters(resource: &Resource, query: &ResourceQuery) -> bool {
    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        if resource.category != category {
            return false;
        }
    }
    if !query.tags.is_empty() && !query.tags.iter().any(|tag| resource.has_tag(tag)) {
        return false;
    }
    if let Some(year) = query.year.filter(|y| *y != 0) {
        if resource.year != Some(year) {
            return false;
        }
    }
    if let Some(rating) = query.rating.filter(|r| *r != 0.0) {
        if resource.rating < rating {
            return false;
        }
    }
    if let Some(status) = query.status {
        if resource.status != status {
            return false;
        }
    }
    if let Some(featured) = query.featured {
        if resource.featured != featured {
            return false;
        }
    }
    true
}

fn matches_search(resource: &Resource, needle: &str) -> bool {
    resource.title.to_lowercase().contains(needle)
        || resource.description.to_lowercase().contains(needle)
        || resource
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Case-insensitive first; among titles equal up to case, lowercase sorts first.
fn compare_titles(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| b.cmp(a))
}

fn compare_by(a: &Resource, b: &Resource, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Title => compare_titles(&a.title, &b.title),
        SortBy::UploadDate => a.upload_date.cmp(&b.upload_date),
        SortBy::Rating => a.rating.total_cmp(&b.rating),
        SortBy::Year => a.year.cmp(&b.year),
        SortBy::Views => a.views.cmp(&b.views),
        SortBy::Downloads => a.downloads.cmp(&b.downloads),
    }
}

/// Filters, sorts and pages `resources`.
///
/// Filters run first, the case-insensitive text search last. The sort is stable. Paging
/// kicks in when `limit` is set, with `page` counting from 1.
pub fn filter_resources(resources: &[Resource], query: &ResourceQuery) -> ResourcePage {
    let needle = query
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());
    let mut matches: Vec<&Resource> = resources
        .iter()
        .filter(|r| matches_filters(r, query))
        .filter(|r| needle.as_deref().map_or(true, |n| matches_search(r, n)))
        .collect();

    if let Some(sort_by) = query.sort_by {
        let order = query.sort_order.unwrap_or_default();
        matches.sort_by(|a, b| {
            let ordering = compare_by(a, b, sort_by);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    let total = matches.len();
    let resources = match query.limit.filter(|l| *l > 0) {
        Some(limit) => {
            let page = query.page.filter(|p| *p > 0).unwrap_or(1);
            matches
                .into_iter()
                .skip((page - 1).saturating_mul(limit))
                .take(limit)
                .cloned()
                .collect()
        }
        None => matches.into_iter().cloned().collect(),
    };
    ResourcePage { resources, total }
}

#[instrument(skip(tx), level = "debug")]
pub fn query_resources(tx: &Transaction, query: &ResourceQuery) -> ResourcePage {
    filter_resources(tx.resources(), query)
}

/// Active resources, most viewed first.
pub fn popular_resources(tx: &Transaction, limit: usize) -> Vec<Resource> {
    let query = ResourceQuery::sorted(SortBy::Views, SortOrder::Desc)
        .with_status(ResourceStatus::Active)
        .with_limit(limit);
    query_resources(tx, &query).resources
}

/// Active resources, newest upload first.
pub fn latest_resources(tx: &Transaction, limit: usize) -> Vec<Resource> {
    let query = ResourceQuery::sorted(SortBy::UploadDate, SortOrder::Desc)
        .with_status(ResourceStatus::Active)
        .with_limit(limit);
    query_resources(tx, &query).resources
}

/// Active featured resources, best rated first.
pub fn featured_resources(tx: &Transaction, limit: usize) -> Vec<Resource> {
    let query = ResourceQuery {
        featured: Some(true),
        ..ResourceQuery::sorted(SortBy::Rating, SortOrder::Desc)
    }
    .with_status(ResourceStatus::Active)
    .with_limit(limit);
    query_resources(tx, &query).resources
}

/// Best rated active resources from the same category, excluding `id` itself.
#[instrument(skip(tx), level = "debug")]
pub fn related_resources(
    tx: &Transaction,
    id: &str,
    limit: usize,
) -> Result<Vec<Resource>, StoreError> {
    let resource = get_resource(tx, id)?;
    let query = ResourceQuery {
        category: Some(resource.category),
        ..ResourceQuery::sorted(SortBy::Rating, SortOrder::Desc)
    }
    .with_status(ResourceStatus::Active)
    .with_limit(limit.saturating_add(1));
    Ok(query_resources(tx, &query)
        .resources
        .into_iter()
        .filter(|r| r.id != resource.id)
        .take(limit)
        .collect())
}
