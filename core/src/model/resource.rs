use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::util::{deserialize_count, deserialize_nullable, deserialize_opt_count};

use super::ResourceId;

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
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

/// A catalogued link to an externally hosted file.
///
/// `views` and `downloads` are exact counts. Data files written before counts were stored as
/// numbers hold formatted strings like `"1.2k"`, those are read with
/// [`crate::util::parse_legacy_count`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    /// slug of the owning category
    pub category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub views: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub downloads: u64,
    pub upload_date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub status: ResourceStatus,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a resource. Missing text fields deserialize as empty so that
/// validation can report all of them at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewResource {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub year: Option<i32>,
    pub episodes: Option<u32>,
    #[serde(deserialize_with = "deserialize_opt_count")]
    pub views: Option<u64>,
    #[serde(deserialize_with = "deserialize_opt_count")]
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

/// Partial update, `None` leaves a field untouched. Optional fields take `Some(None)` to
/// clear them, which is how an explicit `null` deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceUpdate {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<Option<String>>,
    pub rating: Option<f64>,
    #[serde(
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<Option<i32>>,
    #[serde(
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub episodes: Option<Option<u32>>,
    #[serde(deserialize_with = "deserialize_opt_count")]
    pub views: Option<u64>,
    #[serde(deserialize_with = "deserialize_opt_count")]
    pub downloads: Option<u64>,
    pub upload_date: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_size: Option<Option<u64>>,
    #[serde(
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_format: Option<Option<String>>,
    #[serde(
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub download_url: Option<Option<String>>,
    #[serde(
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_url: Option<Option<String>>,
    pub status: Option<ResourceStatus>,
    pub featured: Option<bool>,
}

impl ResourceUpdate {
    pub fn status(status: ResourceStatus) -> Self {
        ResourceUpdate {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl Resource {
    pub fn from_new(new: NewResource, now: DateTime<Utc>) -> Resource {
        Resource {
            id: ResourceId::generate(),
            title: new.title,
            category: new.category,
            description: new.description,
            image: new.image,
            rating: new.rating.unwrap_or(0.0),
            year: new.year,
            episodes: new.episodes,
            views: new.views.unwrap_or(0),
            downloads: new.downloads.unwrap_or(0),
            upload_date: new.upload_date.unwrap_or_else(crate::util::today),
            tags: new.tags,
            file_size: new.file_size,
            file_format: new.file_format,
            download_url: new.download_url,
            preview_url: new.preview_url,
            status: new.status.unwrap_or_default(),
            featured: new.featured.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy with `update` applied, timestamps untouched.
    pub fn merged(&self, update: ResourceUpdate) -> Resource {
        let current = self.clone();
        Resource {
            title: update.title.unwrap_or(current.title),
            category: update.category.unwrap_or(current.category),
            description: update.description.unwrap_or(current.description),
            image: update.image.unwrap_or(current.image),
            rating: update.rating.unwrap_or(current.rating),
            year: update.year.unwrap_or(current.year),
            episodes: update.episodes.unwrap_or(current.episodes),
            views: update.views.unwrap_or(current.views),
            downloads: update.downloads.unwrap_or(current.downloads),
            upload_date: update.upload_date.unwrap_or(current.upload_date),
            tags: update.tags.unwrap_or(current.tags),
            file_size: update.file_size.unwrap_or(current.file_size),
            file_format: update.file_format.unwrap_or(current.file_format),
            download_url: update.download_url.unwrap_or(current.download_url),
            preview_url: update.preview_url.unwrap_or(current.preview_url),
            status: update.status.unwrap_or(current.status),
            featured: update.featured.unwrap_or(current.featured),
            ..current
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
