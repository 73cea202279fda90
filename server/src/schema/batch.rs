use serde::Serialize;
use utoipa::ToSchema;

use quarkhub_core::model;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemError {
    pub id: String,
    pub error: String,
}

impl ItemError {
    pub fn from_models(values: &[model::ItemError]) -> Vec<ItemError> {
        values
            .iter()
            .map(|e| ItemError {
                id: e.id.clone(),
                error: e.error.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub success: bool,
    pub processed: usize,
    pub failed: usize,
    pub errors: Vec<ItemError>,
    pub committed: bool,
}

impl BatchOutcome {
    pub fn from_model(value: &model::BatchOutcome) -> BatchOutcome {
        BatchOutcome {
            success: value.success,
            processed: value.processed,
            failed: value.failed,
            errors: ItemError::from_models(&value.errors),
            committed: value.committed,
        }
    }
}
