use camino::Utf8PathBuf as PathBuf;
use claims::{assert_none, assert_ok, assert_some};
use pretty_assertions::assert_eq;

use crate::{
    model::{
        repository::{resource, Store},
        Category, StoreSettings,
    },
    storage::{Collection, JsonFileBackend, MemoryBackend, StorageBackend},
};

use super::*;

fn temp_root() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    (dir, root)
}

#[tokio::test]
async fn file_backend_write_replaces_document() {
    let (_dir, root) = temp_root();
    let backend = JsonFileBackend::new(root.join("nested"));
    assert_none!(assert_ok!(backend.read(Collection::Resources).await));
    assert_ok!(backend.write(Collection::Resources, "[1]".to_owned()).await);
    assert_ok!(backend.write(Collection::Resources, "[2]".to_owned()).await);
    assert_eq!(
        assert_ok!(backend.read(Collection::Resources).await),
        Some("[2]".to_owned())
    );
    let leftovers: Vec<String> = std::fs::read_dir(backend.root())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(leftovers, vec!["resources.json".to_owned()]);
}

#[tokio::test]
async fn open_seeds_files() {
    let (_dir, root) = temp_root();
    let backend = JsonFileBackend::new(root.clone());
    assert_ok!(Store::open(backend.clone()).await);
    let categories: Vec<Category> = serde_json::from_str(
        &std::fs::read_to_string(backend.path(Collection::Categories)).unwrap(),
    )
    .unwrap();
    assert_eq!(categories.len(), 7);
    let settings: StoreSettings = serde_json::from_str(
        &std::fs::read_to_string(root.join("config.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(settings, StoreSettings::default());

    // reopening keeps existing categories
    let store = assert_ok!(Store::open(backend).await);
    let tx = store.begin().await;
    assert_eq!(tx.categories(), categories.as_slice());
}

#[tokio::test]
async fn corrupt_document_reads_as_empty() {
    let backend = MemoryBackend::new().with_document(Collection::Resources, "{not json");
    let store = assert_ok!(Store::open(backend.clone()).await);
    let mut tx = store.begin().await;
    assert!(tx.resources().is_empty());
    assert_ok!(resource::create_resource(&mut tx, new_resource("a", "anime")));
    assert_ok!(tx.commit().await);
    let contents = assert_some!(assert_ok!(backend.read(Collection::Resources).await));
    assert!(contents.starts_with('['));
}

#[tokio::test]
async fn legacy_counter_strings_are_read() {
    let legacy = r#"[{
        "id": "1700000000000-abcdefghi",
        "title": "旧资源",
        "category": "other",
        "description": "legacy",
        "rating": 7.5,
        "views": "1.2k",
        "downloads": 56,
        "uploadDate": "2023-11-14",
        "tags": [],
        "status": "active",
        "featured": false,
        "createdAt": "2023-11-14T22:13:20.000Z",
        "updatedAt": "2023-11-14T22:13:20.000Z"
    }]"#;
    let backend = MemoryBackend::new().with_document(Collection::Resources, legacy);
    let store = assert_ok!(Store::open(backend).await);
    let tx = store.begin().await;
    let r = assert_ok!(resource::get_resource(&tx, "1700000000000-abcdefghi"));
    assert_eq!((r.views, r.downloads), (12, 56));
}

#[tokio::test]
async fn concurrent_increments_are_not_lost() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    let created = assert_ok!(resource::create_resource(&mut tx, new_resource("a", "anime")));
    assert_ok!(tx.commit().await);

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let store = store.clone();
            let id = created.id.to_string();
            tokio::spawn(async move {
                let mut tx = store.begin().await;
                resource::increment_views(&mut tx, &id)?;
                tx.commit().await
            })
        })
        .collect();
    for handle in handles {
        assert_ok!(handle.await.unwrap());
    }
    let tx = store.begin().await;
    assert_eq!(tx.resources()[0].views, 20);
}
