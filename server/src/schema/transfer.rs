use serde::Serialize;
use utoipa::ToSchema;

use quarkhub_core::model;

use super::ItemError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub resources_imported: usize,
    pub categories_imported: usize,
    pub errors: Vec<ItemError>,
}

impl ImportOutcome {
    pub fn from_model(value: &model::ImportOutcome) -> ImportOutcome {
        ImportOutcome {
            resources_imported: value.resources_imported,
            categories_imported: value.categories_imported,
            errors: ItemError::from_models(&value.errors),
        }
    }
}
