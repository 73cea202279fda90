use chrono::{SecondsFormat, Utc};
use eyre::{eyre, Context};
use tracing::{info, instrument};

use crate::model::{
    default_categories, ExportData, ImportData, ImportOutcome, ItemError, Resource,
    EXPORT_VERSION,
};

use super::{category, resource, Store, StoreError, Transaction};

const CSV_HEADER: [&str; 20] = [
    "id",
    "title",
    "category",
    "description",
    "image",
    "rating",
    "year",
    "episodes",
    "views",
    "downloads",
    "uploadDate",
    "tags",
    "fileSize",
    "fileFormat",
    "downloadUrl",
    "previewUrl",
    "status",
    "featured",
    "createdAt",
    "updatedAt",
];

#[instrument(skip(tx), level = "debug")]
pub fn export_data(tx: &Transaction) -> ExportData {
    ExportData {
        resources: tx.resources().to_vec(),
        categories: tx.categories().to_vec(),
        export_date: Utc::now(),
        version: EXPORT_VERSION.to_owned(),
    }
}

fn csv_row(resource: &Resource) -> [String; 20] {
    fn opt<T: ToString>(value: &Option<T>) -> String {
        value.as_ref().map(T::to_string).unwrap_or_default()
    }
    [
        resource.id.to_string(),
        resource.title.clone(),
        resource.category.clone(),
        resource.description.clone(),
        opt(&resource.image),
        resource.rating.to_string(),
        opt(&resource.year),
        opt(&resource.episodes),
        resource.views.to_string(),
        resource.downloads.to_string(),
        resource.upload_date.clone(),
        resource.tags.join(","),
        opt(&resource.file_size),
        opt(&resource.file_format),
        opt(&resource.download_url),
        opt(&resource.preview_url),
        resource.status.to_string(),
        resource.featured.to_string(),
        resource
            .created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        resource
            .updated_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    ]
}

/// Renders the exported resources as CSV, one row per resource with a header row.
/// Tags are joined with commas inside a single quoted field.
pub async fn export_csv(data: &ExportData) -> Result<String, StoreError> {
    if data.resources.is_empty() {
        return Ok("No resources to export".to_owned());
    }
    let mut writer = csv_async::AsyncWriter::from_writer(Vec::new());
    writer
        .write_record(&CSV_HEADER)
        .await
        .wrap_err("error writing csv header")?;
    for resource in &data.resources {
        writer
            .write_record(&csv_row(resource))
            .await
            .wrap_err_with(|| format!("error writing csv row for {}", resource.id))?;
    }
    let bytes = writer
        .into_inner()
        .await
        .map_err(|err| eyre!("error finishing csv output: {}", err))?;
    let csv = String::from_utf8(bytes).wrap_err("csv output is not valid utf-8")?;
    Ok(csv)
}

/// Adds the imported items to `tx`, categories first so imported resources can refer to
/// them. Items failing validation are skipped and reported.
pub fn apply_import(tx: &mut Transaction, data: ImportData) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();
    for new in data.categories.unwrap_or_default() {
        let slug = new.slug.clone();
        match category::create_category(tx, new) {
            Ok(_) => outcome.categories_imported += 1,
            Err(err) => outcome.errors.push(ItemError {
                id: slug,
                error: err.to_string(),
            }),
        }
    }
    for new in data.resources.unwrap_or_default() {
        let title = new.title.clone();
        match resource::create_resource(tx, new) {
            Ok(_) => outcome.resources_imported += 1,
            Err(err) => outcome.errors.push(ItemError {
                id: title,
                error: err.to_string(),
            }),
        }
    }
    outcome
}

/// Imports resources and categories in one write.
///
/// With `atomic` set, a single rejected item fails the whole import and nothing is written.
#[instrument(skip(store, data), fields(atomic = data.atomic))]
pub async fn import_data(store: &Store, data: ImportData) -> Result<ImportOutcome, StoreError> {
    if data.resources.is_none() && data.categories.is_none() {
        return Err(StoreError::InvalidRequest(
            "import data must contain resources or categories".to_owned(),
        ));
    }
    let atomic = data.atomic;
    let mut tx = store.begin().await;
    let outcome = apply_import(&mut tx, data);
    if atomic && !outcome.errors.is_empty() {
        let errors = outcome
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.id, e.error))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(StoreError::InvalidRequest(format!(
            "import rejected: {}",
            errors
        )));
    }
    tx.commit().await?;
    info!(
        resources = outcome.resources_imported,
        categories = outcome.categories_imported,
        errors = outcome.errors.len(),
        "import done"
    );
    Ok(outcome)
}

/// Removes every resource and resets categories to the defaults.
#[instrument(skip(store))]
pub async fn clear_all(store: &Store) -> Result<(), StoreError> {
    let mut tx = store.begin().await;
    tx.resources_mut().clear();
    *tx.categories_mut() = default_categories(Utc::now());
    tx.commit().await?;
    info!("cleared all data");
    Ok(())
}
