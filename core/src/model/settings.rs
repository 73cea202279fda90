use serde::{Deserialize, Serialize};

/// Store level settings kept next to the data files in `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub version: String,
    pub max_depth: u32,
    pub default_category: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            version: super::EXPORT_VERSION.to_owned(),
            max_depth: 3,
            default_category: "other".to_owned(),
        }
    }
}
