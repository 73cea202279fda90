use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use quarkhub_core::{config::Config, storage::MemoryBackend, Store};

use crate::{app_router, app_state::AppState};

mod category;

pub async fn test_app() -> Router {
    let store = Store::open(MemoryBackend::new())
        .await
        .expect("opening memory store failed");
    app_router(Arc::new(AppState {
        store,
        config: Config::default(),
    }))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is not json")
    }
}

pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = send_raw(app, method, uri, body.map(|b| b.to_string())).await;
    let json = response.json();
    (response.status, json)
}

pub async fn create_resource(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, Method::POST, "/api/resources", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    json["data"].clone()
}

pub fn resource_body(title: &str, category: &str) -> Value {
    json!({
        "title": title,
        "category": category,
        "description": format!("{} description", title),
    })
}
