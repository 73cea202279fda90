use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use quarkhub_core::model;

use super::CategoryId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    pub order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn from_model(value: &model::Category) -> Category {
        Category {
            id: (&value.id).into(),
            name: value.name.clone(),
            slug: value.slug.clone(),
            description: value.description.clone(),
            icon: value.icon.clone(),
            color: value.color.clone(),
            parent_id: value.parent_id.as_ref().map(CategoryId::from),
            order: value.order,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }

    pub fn from_models(values: &[model::Category]) -> Vec<Category> {
        values.iter().map(Category::from_model).collect()
    }
}
