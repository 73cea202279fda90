use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CategoryId;

pub const DEFAULT_CATEGORY_ORDER: i64 = 999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// lowercase-kebab, unique across categories
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_is_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub order: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub order: Option<i64>,
    pub is_active: Option<bool>,
}

impl Category {
    pub fn from_new(new: NewCategory, now: DateTime<Utc>) -> Category {
        Category {
            id: CategoryId::generate(),
            name: new.name,
            slug: new.slug,
            description: new.description,
            icon: new.icon,
            color: new.color,
            parent_id: new.parent_id,
            order: new.order.unwrap_or(DEFAULT_CATEGORY_ORDER),
            is_active: new.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn merged(&self, update: CategoryUpdate) -> Category {
        let current = self.clone();
        Category {
            name: update.name.unwrap_or(current.name),
            slug: update.slug.unwrap_or(current.slug),
            description: update.description.or(current.description),
            icon: update.icon.or(current.icon),
            color: update.color.or(current.color),
            parent_id: update.parent_id.or(current.parent_id),
            order: update.order.unwrap_or(current.order),
            is_active: update.is_active.unwrap_or(current.is_active),
            ..current
        }
    }
}

/// Categories a fresh store starts out with.
pub fn default_categories(now: DateTime<Utc>) -> Vec<Category> {
    [
        ("国剧", "chinese-drama", "国产电视剧", "🎭", "#3B82F6", 1),
        ("科幻电影", "sci-fi-movie", "科幻类电影", "🚀", "#8B5CF6", 2),
        ("科幻剧", "sci-fi-drama", "科幻类电视剧", "🛸", "#06B6D4", 3),
        ("犯罪剧", "crime-drama", "犯罪悬疑类电视剧", "🔍", "#EF4444", 4),
        ("古装电影", "costume-movie", "古装历史类电影", "👑", "#F59E0B", 5),
        ("动漫", "anime", "动画片和动漫", "🎨", "#10B981", 6),
        ("其他", "other", "其他类型资源", "📁", "#6B7280", DEFAULT_CATEGORY_ORDER),
    ]
    .into_iter()
    .map(|(name, slug, description, icon, color, order)| Category {
        id: CategoryId::generate(),
        name: name.to_owned(),
        slug: slug.to_owned(),
        description: Some(description.to_owned()),
        icon: Some(icon.to_owned()),
        color: Some(color.to_owned()),
        parent_id: None,
        order,
        is_active: true,
        created_at: now,
        updated_at: now,
    })
    .collect()
}
