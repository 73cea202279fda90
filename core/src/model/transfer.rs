use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use super::{Category, ItemError, NewCategory, NewResource, Resource};

pub const EXPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub resources: Vec<Resource>,
    pub categories: Vec<Category>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

/// Import payload. Ids and timestamps in the payload are ignored, every imported item gets
/// fresh ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportData {
    pub resources: Option<Vec<NewResource>>,
    pub categories: Option<Vec<NewCategory>>,
    /// Reject the whole import if any item fails.
    pub atomic: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub resources_imported: usize,
    pub categories_imported: usize,
    /// `id` is the title or slug of the rejected item
    pub errors: Vec<ItemError>,
}
