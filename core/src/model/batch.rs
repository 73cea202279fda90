use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BatchAction {
    Delete,
    Update,
    Activate,
    Deactivate,
}

/// One action applied to many ids.
///
/// `data` carries the partial update for [`BatchAction::Update`] and is interpreted as a
/// resource update for `resource_ids` and a category update for `category_ids`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOperation {
    pub action: BatchAction,
    #[serde(default)]
    pub resource_ids: Vec<String>,
    #[serde(default)]
    pub category_ids: Vec<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// When set, nothing is persisted unless every id succeeds.
    #[serde(default)]
    pub atomic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemError {
    pub id: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// true if no id failed
    pub success: bool,
    pub processed: usize,
    pub failed: usize,
    pub errors: Vec<ItemError>,
    /// false if an atomic batch was rolled back
    pub committed: bool,
}
