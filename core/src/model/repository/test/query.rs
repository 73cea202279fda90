use claims::assert_ok;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::model::{
    repository::{query, resource, Transaction},
    NewResource, Resource, ResourceQuery, ResourceStatus, SortBy, SortOrder,
};

use super::*;

fn create_all(tx: &mut Transaction, items: Vec<NewResource>) -> Vec<Resource> {
    items
        .into_iter()
        .map(|new| assert_ok!(resource::create_resource(tx, new)))
        .collect()
}

#[tokio::test]
async fn category_sort_and_page() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    let mut items: Vec<NewResource> = (0..12)
        .map(|i| rated(&format!("anime {}", i), "anime", (i % 7) as f64 + 0.5))
        .collect();
    items.push(rated("movie", "sci-fi-movie", 9.9));
    items.push(rated("drama", "chinese-drama", 9.8));
    create_all(&mut tx, items);

    let q = ResourceQuery {
        category: Some("anime".to_owned()),
        page: Some(2),
        limit: Some(5),
        ..ResourceQuery::sorted(SortBy::Rating, SortOrder::Desc)
    };
    let page = query::query_resources(&tx, &q);
    assert_eq!(page.total, 12);
    assert_eq!(page.resources.len(), 5);
    assert!(page.resources.iter().all(|r| r.category == "anime"));
    assert!(page
        .resources
        .windows(2)
        .all(|w| w[0].rating >= w[1].rating));

    let all = query::query_resources(
        &tx,
        &ResourceQuery {
            category: Some("anime".to_owned()),
            ..ResourceQuery::sorted(SortBy::Rating, SortOrder::Desc)
        },
    );
    assert_eq!(all.total, 12);
    assert_eq!(page.resources, all.resources[5..10].to_vec());

    let last = query::query_resources(
        &tx,
        &ResourceQuery {
            page: Some(3),
            ..q.clone()
        },
    );
    assert_eq!(last.resources.len(), 2);
    let past_end = query::query_resources(
        &tx,
        &ResourceQuery {
            page: Some(4),
            ..q
        },
    );
    assert!(past_end.resources.is_empty());
    assert_eq!(past_end.total, 12);
}

#[tokio::test]
async fn filters_combine() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    let created = create_all(
        &mut tx,
        vec![
            NewResource {
                year: Some(2023),
                tags: vec!["科幻".to_owned(), "太空".to_owned()],
                featured: Some(true),
                ..rated("流浪地球2", "sci-fi-movie", 8.3)
            },
            NewResource {
                year: Some(2019),
                tags: vec!["科幻".to_owned()],
                ..rated("流浪地球", "sci-fi-movie", 7.9)
            },
            NewResource {
                year: Some(2023),
                status: Some(ResourceStatus::Inactive),
                description: "A story about the STARS".to_owned(),
                ..rated("三体", "sci-fi-drama", 8.7)
            },
        ],
    );
    let titles = |q: ResourceQuery| -> Vec<String> {
        query::query_resources(&tx, &q)
            .resources
            .into_iter()
            .map(|r| r.title)
            .collect()
    };
    assert_eq!(
        titles(ResourceQuery {
            year: Some(2023),
            ..Default::default()
        }),
        vec!["流浪地球2", "三体"]
    );
    assert_eq!(
        titles(ResourceQuery {
            rating: Some(8.0),
            ..Default::default()
        }),
        vec!["流浪地球2", "三体"]
    );
    // zero year and rating do not filter
    assert_eq!(
        titles(ResourceQuery {
            year: Some(0),
            rating: Some(0.0),
            ..Default::default()
        })
        .len(),
        3
    );
    assert_eq!(
        titles(ResourceQuery {
            tags: vec!["太空".to_owned(), "不存在".to_owned()],
            ..Default::default()
        }),
        vec!["流浪地球2"]
    );
    assert_eq!(
        titles(ResourceQuery {
            status: Some(ResourceStatus::Inactive),
            ..Default::default()
        }),
        vec!["三体"]
    );
    assert_eq!(
        titles(ResourceQuery {
            featured: Some(true),
            ..Default::default()
        }),
        vec!["流浪地球2"]
    );
    assert_eq!(
        titles(ResourceQuery {
            search: Some("stars".to_owned()),
            ..Default::default()
        }),
        vec!["三体"]
    );
    assert_eq!(
        titles(ResourceQuery {
            search: Some("太空".to_owned()),
            ..Default::default()
        }),
        vec!["流浪地球2"]
    );
    assert_eq!(created.len(), 3);
}

#[tokio::test]
async fn shortcuts_only_return_active() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    let created = create_all(
        &mut tx,
        vec![
            NewResource {
                views: Some(500),
                upload_date: Some("2024-01-01".to_owned()),
                featured: Some(true),
                ..rated("a", "anime", 7.0)
            },
            NewResource {
                views: Some(900),
                upload_date: Some("2024-03-01".to_owned()),
                status: Some(ResourceStatus::Inactive),
                featured: Some(true),
                ..rated("b", "anime", 9.0)
            },
            NewResource {
                views: Some(100),
                upload_date: Some("2024-02-01".to_owned()),
                featured: Some(true),
                ..rated("c", "anime", 8.0)
            },
            NewResource {
                upload_date: Some("2023-12-01".to_owned()),
                ..rated("d", "other", 9.5)
            },
        ],
    );
    let titles = |resources: Vec<Resource>| -> Vec<String> {
        resources.into_iter().map(|r| r.title).collect()
    };
    assert_eq!(titles(query::popular_resources(&tx, 2)), vec!["a", "c"]);
    assert_eq!(titles(query::latest_resources(&tx, 10)), vec!["c", "a", "d"]);
    assert_eq!(titles(query::featured_resources(&tx, 10)), vec!["c", "a"]);

    let related = assert_ok!(query::related_resources(&tx, created[0].id.as_str(), 5));
    assert_eq!(titles(related), vec!["c"]);
    assert!(query::related_resources(&tx, "missing", 5).is_err());
}

#[tokio::test]
async fn title_sort_ignores_case() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    create_all(
        &mut tx,
        ["cherry", "Banana", "apple", "Apple"]
            .into_iter()
            .map(|title| new_resource(title, "anime"))
            .collect(),
    );
    let titles = |order: SortOrder| -> Vec<String> {
        query::query_resources(&tx, &ResourceQuery::sorted(SortBy::Title, order))
            .resources
            .into_iter()
            .map(|r| r.title)
            .collect()
    };
    assert_eq!(titles(SortOrder::Asc), vec!["apple", "Apple", "Banana", "cherry"]);
    assert_eq!(titles(SortOrder::Desc), vec!["cherry", "Banana", "Apple", "apple"]);
}

#[tokio::test]
async fn related_with_huge_limit() {
    let store = test_store().await;
    let mut tx = store.begin().await;
    let created = create_all(&mut tx, vec![rated("a", "anime", 7.0), rated("b", "anime", 8.0)]);
    let related = assert_ok!(query::related_resources(&tx, created[0].id.as_str(), usize::MAX));
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].title, "b");
}

fn resources_with_ratings(ratings: &[u8]) -> Vec<Resource> {
    let now = chrono::Utc::now();
    ratings
        .iter()
        .enumerate()
        .map(|(i, rating)| {
            Resource::from_new(
                rated(&format!("{:03}", i), "anime", (*rating % 11) as f64),
                now,
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_pagination_counts(
        ratings in prop::collection::vec(any::<u8>(), 0..40),
        page in 1usize..6,
        limit in 1usize..10,
    ) {
        let resources = resources_with_ratings(&ratings);
        let q = ResourceQuery {
            page: Some(page),
            limit: Some(limit),
            ..ResourceQuery::sorted(SortBy::Rating, SortOrder::Desc)
        };
        let result = query::filter_resources(&resources, &q);
        prop_assert_eq!(result.total, resources.len());
        let expected = limit.min(resources.len().saturating_sub((page - 1) * limit));
        prop_assert_eq!(result.resources.len(), expected);
    }

    #[test]
    fn prop_sort_is_stable(ratings in prop::collection::vec(0u8..4, 0..40)) {
        let resources = resources_with_ratings(&ratings);
        let result = query::filter_resources(
            &resources,
            &ResourceQuery::sorted(SortBy::Rating, SortOrder::Desc),
        );
        // titles are the insertion index, zero padded
        for pair in result.resources.windows(2) {
            prop_assert!(pair[0].rating >= pair[1].rating);
            if pair[0].rating == pair[1].rating {
                prop_assert!(pair[0].title < pair[1].title);
            }
        }
    }
}
