use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Envelope every route responds with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Json<ApiResponse<T>> {
        Json(ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        })
    }

    pub fn created(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
        (StatusCode::CREATED, Self::ok(data))
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
        Json(ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        })
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Json<ApiResponse<()>> {
        Json(ApiResponse {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        })
    }

    pub fn failure(error: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}
