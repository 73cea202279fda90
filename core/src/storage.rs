use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};
use enum_dispatch::enum_dispatch;
use eyre::{eyre, Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use strum::AsRefStr;
use tracing::{instrument, warn};

/// The JSON documents a store is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    Resources,
    Categories,
    Stats,
    /// store settings, kept in `config.json`
    #[strum(serialize = "config")]
    Settings,
}

impl Collection {
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_ref())
    }
}

/// Where the store keeps its documents.
/// Every document is read and replaced as a whole.
#[async_trait]
#[enum_dispatch(Backend)]
pub trait StorageBackend {
    /// Returns `None` if the document has never been written.
    async fn read(&self, collection: Collection) -> Result<Option<String>>;
    /// Replaces the document. Readers never observe a partially written document.
    async fn write(&self, collection: Collection, contents: String) -> Result<()>;
}

#[enum_dispatch]
#[derive(Debug, Clone)]
pub enum Backend {
    JsonFileBackend,
    MemoryBackend,
}

/// Reads and deserializes a document, falling back to the default if it
/// is missing, unreadable or does not parse.
pub async fn read_json<T>(backend: &Backend, collection: Collection) -> T
where
    T: DeserializeOwned + Default,
{
    let contents = match backend.read(collection).await {
        Ok(Some(contents)) => contents,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!(
                collection = collection.as_ref(),
                "error reading document, using empty value: {:#}", err
            );
            return T::default();
        }
    };
    match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                collection = collection.as_ref(),
                "error parsing document, using empty value: {}", err
            );
            T::default()
        }
    }
}

pub async fn write_json<T>(backend: &Backend, collection: Collection, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let contents = serde_json::to_string_pretty(value)
        .wrap_err_with(|| format!("could not serialize {}", collection.as_ref()))?;
    backend.write(collection, contents).await
}

/// One `<collection>.json` file per collection inside `root`.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    root: PathBuf,
}

impl JsonFileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonFileBackend { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }
}

#[async_trait]
impl StorageBackend for JsonFileBackend {
    #[instrument(skip(self), level = "trace")]
    async fn read(&self, collection: Collection) -> Result<Option<String>> {
        let path = self.path(collection);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).wrap_err_with(|| format!("error reading {}", path)),
        }
    }

    #[instrument(skip(self, contents), level = "trace")]
    async fn write(&self, collection: Collection, contents: String) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .wrap_err_with(|| format!("could not create data directory {}", self.root))?;
        let path = self.path(collection);
        let tmp_path = self.root.join(format!(
            ".{}-{}.tmp",
            collection.as_ref(),
            uuid::Uuid::new_v4()
        ));
        tokio::fs::write(&tmp_path, contents)
            .await
            .wrap_err_with(|| format!("error writing {}", tmp_path))?;
        if let Err(err) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(err).wrap_err_with(|| format!("error replacing {}", path));
        }
        Ok(())
    }
}

/// Keeps documents in memory, for tests and throwaway instances.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    documents: Arc<std::sync::Mutex<HashMap<Collection, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw document, which does not need to be valid JSON.
    pub fn with_document(self, collection: Collection, contents: impl Into<String>) -> Self {
        if let Ok(mut documents) = self.documents.lock() {
            documents.insert(collection, contents.into());
        }
        self
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn read(&self, collection: Collection) -> Result<Option<String>> {
        let documents = self
            .documents
            .lock()
            .map_err(|_| eyre!("memory backend lock poisoned"))?;
        Ok(documents.get(&collection).cloned())
    }

    async fn write(&self, collection: Collection, contents: String) -> Result<()> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| eyre!("memory backend lock poisoned"))?;
        documents.insert(collection, contents);
        Ok(())
    }
}
