/// Everything a store operation can fail with.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{entity} '{id}' does not exist")]
    NotFound { entity: &'static str, id: String },
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Io {
        #[from]
        source: eyre::Report,
    },
}

impl StoreError {
    pub fn resource_not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: "resource",
            id: id.into(),
        }
    }

    pub fn category_not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: "category",
            id: id.into(),
        }
    }
}
