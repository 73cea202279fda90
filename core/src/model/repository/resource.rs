use chrono::Utc;
use tracing::{debug, instrument};

use crate::model::{NewResource, Resource, ResourceUpdate};

use super::{
    validation::{ensure_valid, validate_resource},
    StoreError, Transaction,
};

fn position(tx: &Transaction, id: &str) -> Result<usize, StoreError> {
    tx.resources()
        .iter()
        .position(|r| r.id == *id)
        .ok_or_else(|| StoreError::resource_not_found(id))
}

#[instrument(skip(tx), level = "trace")]
pub fn get_resource(tx: &Transaction, id: &str) -> Result<Resource, StoreError> {
    let idx = position(tx, id)?;
    Ok(tx.resources()[idx].clone())
}

#[instrument(skip(tx, new), fields(title = %new.title))]
pub fn create_resource(tx: &mut Transaction, new: NewResource) -> Result<Resource, StoreError> {
    let resource = Resource::from_new(new, Utc::now());
    ensure_valid(validate_resource(&resource))?;
    debug!(id = %resource.id, "created resource");
    tx.resources_mut().push(resource.clone());
    Ok(resource)
}

/// Applies a partial update. The merged record has to pass validation as a whole.
#[instrument(skip(tx, update))]
pub fn update_resource(
    tx: &mut Transaction,
    id: &str,
    update: ResourceUpdate,
) -> Result<Resource, StoreError> {
    let idx = position(tx, id)?;
    let mut updated = tx.resources()[idx].merged(update);
    ensure_valid(validate_resource(&updated))?;
    updated.updated_at = Utc::now();
    tx.resources_mut()[idx] = updated.clone();
    Ok(updated)
}

/// Removes the resource and returns it.
#[instrument(skip(tx))]
pub fn delete_resource(tx: &mut Transaction, id: &str) -> Result<Resource, StoreError> {
    let idx = position(tx, id)?;
    Ok(tx.resources_mut().remove(idx))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Views,
    Downloads,
}

/// Adds one to a counter. Counters are not user editable fields, so this skips validation.
#[instrument(skip(tx))]
pub fn increment_counter(
    tx: &mut Transaction,
    id: &str,
    counter: Counter,
) -> Result<Resource, StoreError> {
    let idx = position(tx, id)?;
    let resource = &mut tx.resources_mut()[idx];
    match counter {
        Counter::Views => resource.views = resource.views.saturating_add(1),
        Counter::Downloads => resource.downloads = resource.downloads.saturating_add(1),
    }
    resource.updated_at = Utc::now();
    Ok(resource.clone())
}

pub fn increment_views(tx: &mut Transaction, id: &str) -> Result<Resource, StoreError> {
    increment_counter(tx, id, Counter::Views)
}

pub fn increment_downloads(tx: &mut Transaction, id: &str) -> Result<Resource, StoreError> {
    increment_counter(tx, id, Counter::Downloads)
}
