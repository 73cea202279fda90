use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, instrument, warn};

use crate::{
    model::{default_categories, Category, Resource, StatsSnapshot, StoreSettings},
    storage::{read_json, write_json, Backend, Collection},
};

use super::{stats::compute_stats, StoreError};

/// Handle to the resource catalog.
///
/// Cloning is cheap and clones share the same backend. All access goes through a
/// [`Transaction`], and only one transaction is open at a time, so concurrent
/// read-modify-write cycles are serialized instead of overwriting each other.
#[derive(Debug, Clone)]
pub struct Store {
    backend: Arc<Mutex<Backend>>,
}

impl Store {
    /// Opens the store, seeding default categories if there are none and writing the
    /// settings document.
    #[instrument(skip(backend))]
    pub async fn open(backend: impl Into<Backend>) -> Result<Store, StoreError> {
        let backend: Backend = backend.into();
        let categories: Vec<Category> = read_json(&backend, Collection::Categories).await;
        if categories.is_empty() {
            info!("no categories found, seeding defaults");
            write_json(
                &backend,
                Collection::Categories,
                &default_categories(Utc::now()),
            )
            .await?;
        }
        let settings: StoreSettings = read_json(&backend, Collection::Settings).await;
        write_json(&backend, Collection::Settings, &settings).await?;
        Ok(Store {
            backend: Arc::new(Mutex::new(backend)),
        })
    }

    /// Waits for exclusive access and loads both collections.
    /// Changes are only persisted by [`Transaction::commit`].
    pub async fn begin(&self) -> Transaction {
        let backend = self.backend.clone().lock_owned().await;
        let resources = read_json(&backend, Collection::Resources).await;
        let categories = read_json(&backend, Collection::Categories).await;
        Transaction {
            backend,
            resources,
            categories,
            resources_changed: false,
            categories_changed: false,
        }
    }

    pub async fn settings(&self) -> StoreSettings {
        let backend = self.backend.lock().await;
        read_json(&backend, Collection::Settings).await
    }
}

/// Working copy of the catalog, holding the store lock until dropped.
/// Dropping without committing discards every change.
#[derive(Debug)]
pub struct Transaction {
    backend: OwnedMutexGuard<Backend>,
    resources: Vec<Resource>,
    categories: Vec<Category>,
    resources_changed: bool,
    categories_changed: bool,
}

impl Transaction {
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub(super) fn resources_mut(&mut self) -> &mut Vec<Resource> {
        self.resources_changed = true;
        &mut self.resources
    }

    pub(super) fn categories_mut(&mut self) -> &mut Vec<Category> {
        self.categories_changed = true;
        &mut self.categories
    }

    pub(super) fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn has_changes(&self) -> bool {
        self.resources_changed || self.categories_changed
    }

    /// Writes the changed collections, then refreshes the stats document.
    /// A failed stats refresh is logged and does not fail the commit.
    #[instrument(
        skip(self),
        fields(
            resources_changed = self.resources_changed,
            categories_changed = self.categories_changed
        )
    )]
    pub async fn commit(self) -> Result<(), StoreError> {
        if !self.has_changes() {
            debug!("nothing to commit");
            return Ok(());
        }
        if self.categories_changed {
            write_json(&self.backend, Collection::Categories, &self.categories).await?;
        }
        if self.resources_changed {
            write_json(&self.backend, Collection::Resources, &self.resources).await?;
        }
        let refreshed =
            write_stats_snapshot(&self.backend, &self.resources, &self.categories).await;
        if let Err(err) = refreshed {
            warn!("error refreshing stats: {:#}", err);
        }
        Ok(())
    }
}

pub(super) async fn write_stats_snapshot(
    backend: &Backend,
    resources: &[Resource],
    categories: &[Category],
) -> eyre::Result<()> {
    let snapshot = StatsSnapshot {
        stats: compute_stats(resources, categories),
        last_updated: Utc::now(),
    };
    write_json(backend, Collection::Stats, &snapshot).await
}
