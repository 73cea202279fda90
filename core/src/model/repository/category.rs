use chrono::Utc;
use tracing::instrument;

use crate::model::{Category, CategoryUpdate, NewCategory};

use super::{
    validation::{ensure_valid, validate_category},
    StoreError, Transaction,
};

fn position(tx: &Transaction, id: &str) -> Result<usize, StoreError> {
    tx.categories()
        .iter()
        .position(|c| c.id == *id)
        .ok_or_else(|| StoreError::category_not_found(id))
}

fn slug_taken(slug: &str) -> StoreError {
    StoreError::Conflict(format!("category slug '{}' already exists", slug))
}

/// All categories by ascending `order`, ties keep their stored order.
#[instrument(skip(tx), level = "trace")]
pub fn get_categories(tx: &Transaction) -> Vec<Category> {
    let mut categories = tx.categories().to_vec();
    categories.sort_by_key(|c| c.order);
    categories
}

#[instrument(skip(tx), level = "trace")]
pub fn get_category(tx: &Transaction, id: &str) -> Result<Category, StoreError> {
    let idx = position(tx, id)?;
    Ok(tx.categories()[idx].clone())
}

#[instrument(skip(tx), level = "trace")]
pub fn get_category_by_slug(tx: &Transaction, slug: &str) -> Result<Category, StoreError> {
    tx.categories()
        .iter()
        .find(|c| c.slug == slug)
        .cloned()
        .ok_or_else(|| StoreError::NotFound {
            entity: "category",
            id: slug.to_owned(),
        })
}

#[instrument(skip(tx, new), fields(slug = %new.slug))]
pub fn create_category(tx: &mut Transaction, new: NewCategory) -> Result<Category, StoreError> {
    let category = Category::from_new(new, Utc::now());
    ensure_valid(validate_category(&category))?;
    if tx.categories().iter().any(|c| c.slug == category.slug) {
        return Err(slug_taken(&category.slug));
    }
    tx.categories_mut().push(category.clone());
    Ok(category)
}

#[instrument(skip(tx, update))]
pub fn update_category(
    tx: &mut Transaction,
    id: &str,
    update: CategoryUpdate,
) -> Result<Category, StoreError> {
    let idx = position(tx, id)?;
    if let Some(slug) = update.slug.as_deref() {
        let current = &tx.categories()[idx];
        if slug != current.slug
            && tx
                .categories()
                .iter()
                .any(|c| c.slug == slug && c.id != current.id)
        {
            return Err(slug_taken(slug));
        }
    }
    let mut updated = tx.categories()[idx].merged(update);
    ensure_valid(validate_category(&updated))?;
    updated.updated_at = Utc::now();
    tx.categories_mut()[idx] = updated.clone();
    Ok(updated)
}

/// Deletes a category unless a resource still uses its slug or another category names it
/// as parent.
#[instrument(skip(tx))]
pub fn delete_category(tx: &mut Transaction, id: &str) -> Result<Category, StoreError> {
    let idx = position(tx, id)?;
    let category = &tx.categories()[idx];
    if tx.resources().iter().any(|r| r.category == category.slug) {
        return Err(StoreError::Conflict(format!(
            "category '{}' still has resources",
            category.slug
        )));
    }
    if tx
        .categories()
        .iter()
        .any(|c| c.parent_id.as_ref() == Some(&category.id))
    {
        return Err(StoreError::Conflict(format!(
            "category '{}' still has child categories",
            category.slug
        )));
    }
    Ok(tx.categories_mut().remove(idx))
}
