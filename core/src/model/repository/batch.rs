use tracing::{info, instrument};

use crate::model::{
    BatchAction, BatchOperation, BatchOutcome, CategoryUpdate, ItemError, ResourceStatus,
    ResourceUpdate,
};

use super::{category, resource, Store, StoreError, Transaction};

/// Update payload for the given target, only parsed if the batch updates any such id.
fn parse_update<T: serde::de::DeserializeOwned>(
    operation: &BatchOperation,
    ids: &[String],
) -> Result<Option<T>, StoreError> {
    if operation.action != BatchAction::Update || ids.is_empty() {
        return Ok(None);
    }
    operation
        .data
        .as_ref()
        .map(|value| serde_json::from_value(value.clone()))
        .transpose()
        .map_err(|err| StoreError::InvalidRequest(format!("invalid batch update data: {}", err)))
}

fn missing_update_data() -> StoreError {
    StoreError::InvalidRequest("missing update data".to_owned())
}

fn apply_to_resource(
    tx: &mut Transaction,
    action: BatchAction,
    id: &str,
    update: Option<&ResourceUpdate>,
) -> Result<(), StoreError> {
    match (action, update) {
        (BatchAction::Delete, _) => resource::delete_resource(tx, id).map(|_| ()),
        (BatchAction::Update, Some(update)) => {
            resource::update_resource(tx, id, update.clone()).map(|_| ())
        }
        (BatchAction::Update, _) => Err(missing_update_data()),
        (BatchAction::Activate, _) => {
            resource::update_resource(tx, id, ResourceUpdate::status(ResourceStatus::Active))
                .map(|_| ())
        }
        (BatchAction::Deactivate, _) => {
            resource::update_resource(tx, id, ResourceUpdate::status(ResourceStatus::Inactive))
                .map(|_| ())
        }
    }
}

fn apply_to_category(
    tx: &mut Transaction,
    action: BatchAction,
    id: &str,
    update: Option<&CategoryUpdate>,
) -> Result<(), StoreError> {
    match (action, update) {
        (BatchAction::Delete, _) => category::delete_category(tx, id).map(|_| ()),
        (BatchAction::Update, Some(update)) => {
            category::update_category(tx, id, update.clone()).map(|_| ())
        }
        (BatchAction::Update, _) => Err(missing_update_data()),
        (action, _) => Err(StoreError::InvalidRequest(format!(
            "action '{}' is not supported for categories",
            action
        ))),
    }
}

/// Runs the operation against `tx`, one id at a time, resources before categories.
/// Failures are collected per id and do not stop the batch.
pub fn apply_batch(
    tx: &mut Transaction,
    operation: &BatchOperation,
) -> Result<BatchOutcome, StoreError> {
    let resource_update: Option<ResourceUpdate> =
        parse_update(operation, &operation.resource_ids)?;
    let category_update: Option<CategoryUpdate> =
        parse_update(operation, &operation.category_ids)?;
    let mut outcome = BatchOutcome::default();
    let mut record = |id: &str, result: Result<(), StoreError>| match result {
        Ok(()) => outcome.processed += 1,
        Err(err) => {
            outcome.failed += 1;
            outcome.errors.push(ItemError {
                id: id.to_owned(),
                error: err.to_string(),
            });
        }
    };
    for id in &operation.resource_ids {
        let result = apply_to_resource(tx, operation.action, id, resource_update.as_ref());
        record(id, result);
    }
    for id in &operation.category_ids {
        let result = apply_to_category(tx, operation.action, id, category_update.as_ref());
        record(id, result);
    }
    outcome.success = outcome.failed == 0;
    Ok(outcome)
}

/// Applies a batch operation and persists the result in one write.
///
/// An atomic operation with any failed id is discarded as a whole and reported with
/// `committed: false`.
#[instrument(skip(store, operation), fields(action = %operation.action, atomic = operation.atomic))]
pub async fn batch_operation(
    store: &Store,
    operation: &BatchOperation,
) -> Result<BatchOutcome, StoreError> {
    let mut tx = store.begin().await;
    let mut outcome = apply_batch(&mut tx, operation)?;
    if operation.atomic && outcome.failed > 0 {
        info!(failed = outcome.failed, "rolling back atomic batch");
        outcome.committed = false;
        return Ok(outcome);
    }
    tx.commit().await?;
    outcome.committed = true;
    info!(
        processed = outcome.processed,
        failed = outcome.failed,
        "batch applied"
    );
    Ok(outcome)
}
