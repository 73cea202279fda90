use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;

#[tokio::test]
async fn list_is_sorted_by_order() {
    let app = test_app().await;
    let (status, json) = send(
        &app,
        Method::POST,
        "/api/resources/categories",
        Some(json!({ "name": "综艺", "slug": "variety", "order": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["isActive"], true);

    let (status, json) = send(&app, Method::GET, "/api/resources/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs.len(), 8);
    assert_eq!(slugs[0], "variety");
    assert_eq!(slugs[7], "other");
}

#[tokio::test]
async fn create_defaults_and_conflicts() {
    let app = test_app().await;
    let (status, json) = send(
        &app,
        Method::POST,
        "/api/resources/categories",
        Some(json!({ "name": "纪录片", "slug": "documentary" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["order"], 999);

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/resources/categories",
        Some(json!({ "name": "纪录片 2", "slug": "documentary" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("documentary"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/resources/categories",
        Some(json!({ "name": "Bad", "slug": "Not A Slug" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(
        &app,
        Method::GET,
        "/api/resources/categories/slug/documentary",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "纪录片");
}

#[tokio::test]
async fn update_and_delete() {
    let app = test_app().await;
    let (_, json) = send(
        &app,
        Method::GET,
        "/api/resources/categories/slug/anime",
        None,
    )
    .await;
    let uri = format!(
        "/api/resources/categories/{}",
        json["data"]["id"].as_str().unwrap()
    );

    let (status, json) = send(&app, Method::PUT, &uri, Some(json!({ "name": "动画" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "动画");
    assert_eq!(json["data"]["slug"], "anime");

    create_resource(&app, resource_body("鬼灭之刃", "anime")).await;
    let (status, json) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/resources/categories/missing",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
