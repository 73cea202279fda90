use claims::{assert_err, assert_matches, assert_ok};
use pretty_assertions::assert_eq;

use crate::{
    model::{
        repository::{resource, StoreError},
        NewResource, ResourceStatus, ResourceUpdate,
    },
    util::format_count,
};

use super::*;

#[tokio::test]
async fn create_applies_defaults() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    let created = assert_ok!(resource::create_resource(
        &mut tx,
        new_resource("三体", "sci-fi-drama")
    ));
    assert_eq!(created.status, ResourceStatus::Active);
    assert!(!created.featured);
    assert_eq!(created.views, 0);
    assert_eq!(created.downloads, 0);
    assert_eq!(created.upload_date, crate::util::today());
    assert_eq!(created.created_at, created.updated_at);
    assert_ok!(tx.commit().await);

    let tx = store.begin().await;
    let fetched = assert_ok!(resource::get_resource(&tx, created.id.as_str()));
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_missing_title_persists_nothing() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    let new = NewResource {
        title: "  ".to_owned(),
        ..new_resource("", "anime")
    };
    let err = assert_err!(resource::create_resource(&mut tx, new));
    assert_matches!(&err, StoreError::Validation(errors) if errors.len() == 1);
    assert!(err.to_string().contains("title"));
    assert!(tx.resources().is_empty());
}

#[tokio::test]
async fn validation_reports_every_problem() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    let new = NewResource {
        rating: Some(11.0),
        year: Some(1850),
        ..Default::default()
    };
    let err = assert_err!(resource::create_resource(&mut tx, new));
    match err {
        StoreError::Validation(errors) => assert_eq!(errors.len(), 5),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn update_merges_and_revalidates() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    let created = assert_ok!(resource::create_resource(
        &mut tx,
        rated("狂飙", "crime-drama", 8.5)
    ));
    let update = ResourceUpdate {
        featured: Some(true),
        tags: Some(vec!["犯罪".to_owned()]),
        ..Default::default()
    };
    let updated = assert_ok!(resource::update_resource(
        &mut tx,
        created.id.as_str(),
        update
    ));
    assert!(updated.featured);
    assert_eq!(updated.title, "狂飙");
    assert_eq!(updated.rating, 8.5);
    assert!(updated.has_tag("犯罪"));
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.created_at, created.created_at);

    let bad = ResourceUpdate {
        rating: Some(-1.0),
        ..Default::default()
    };
    assert_matches!(
        resource::update_resource(&mut tx, created.id.as_str(), bad),
        Err(StoreError::Validation(_))
    );
    let current = assert_ok!(resource::get_resource(&tx, created.id.as_str()));
    assert_eq!(current, updated);
}

#[tokio::test]
async fn update_can_clear_optional_fields() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    let created = assert_ok!(resource::create_resource(
        &mut tx,
        NewResource {
            image: Some("cover.jpg".to_owned()),
            year: Some(2023),
            ..new_resource("狂飙", "crime-drama")
        }
    ));
    let update: ResourceUpdate =
        assert_ok!(serde_json::from_str(r#"{"image": null, "episodes": 39}"#));
    let updated = assert_ok!(resource::update_resource(
        &mut tx,
        created.id.as_str(),
        update
    ));
    assert_eq!(updated.image, None);
    assert_eq!(updated.year, Some(2023));
    assert_eq!(updated.episodes, Some(39));
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    assert_matches!(
        resource::get_resource(&tx, "nope"),
        Err(StoreError::NotFound { entity: "resource", .. })
    );
    assert_matches!(
        resource::delete_resource(&mut tx, "nope"),
        Err(StoreError::NotFound { .. })
    );
    assert_matches!(
        resource::update_resource(&mut tx, "nope", ResourceUpdate::default()),
        Err(StoreError::NotFound { .. })
    );
    assert_matches!(
        resource::increment_views(&mut tx, "nope"),
        Err(StoreError::NotFound { .. })
    );
}

#[tokio::test]
async fn delete_returns_removed_resource() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    let a = assert_ok!(resource::create_resource(&mut tx, new_resource("a", "anime")));
    let b = assert_ok!(resource::create_resource(&mut tx, new_resource("b", "anime")));
    let removed = assert_ok!(resource::delete_resource(&mut tx, a.id.as_str()));
    assert_eq!(removed.id, a.id);
    assert_eq!(tx.resources().len(), 1);
    assert_eq!(tx.resources()[0].id, b.id);
}

#[tokio::test]
async fn dropped_transaction_discards_changes() {
    let store = test_store().await;
    {
        let mut tx = store.begin().await;
        assert_ok!(resource::create_resource(&mut tx, new_resource("a", "anime")));
    }
    let tx = store.begin().await;
    assert!(tx.resources().is_empty());
}

#[tokio::test]
async fn counters_increment_and_format() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    let new = NewResource {
        views: Some(999),
        downloads: Some(999_999),
        ..new_resource("流浪地球", "sci-fi-movie")
    };
    let created = assert_ok!(resource::create_resource(&mut tx, new));
    let viewed = assert_ok!(resource::increment_views(&mut tx, created.id.as_str()));
    assert_eq!(viewed.views, 1000);
    assert_eq!(format_count(viewed.views), "1.0k");
    let downloaded = assert_ok!(resource::increment_downloads(
        &mut tx,
        created.id.as_str()
    ));
    assert_eq!(downloaded.downloads, 1_000_000);
    assert_eq!(downloaded.views, 1000);
    assert_eq!(format_count(downloaded.downloads), "1.0M");
    assert_ok!(tx.commit().await);

    let tx = store.begin().await;
    let stored = assert_ok!(resource::get_resource(&tx, created.id.as_str()));
    assert_eq!((stored.views, stored.downloads), (1000, 1_000_000));
}
