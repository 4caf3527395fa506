//! Tests for `AppError` → HTTP response mapping.
//!
//! Each variant is converted with `IntoResponse` directly; no router is
//! involved.

use atelier_api::error::AppError;
use atelier_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404_without_id() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Team member",
        id: "0b7c".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Team member not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::missing_fields(&["name", "slug"]));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Missing required fields: name, slug");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("Search query is required".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Search query is required");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::duplicate_slug("service"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "A service with this slug already exists");
}

#[tokio::test]
async fn access_denials_differ_only_by_status() {
    let (unauthorized, a) = error_to_response(CoreError::unauthorized().into()).await;
    let (forbidden, b) = error_to_response(CoreError::forbidden().into()).await;

    assert_eq!(unauthorized, StatusCode::UNAUTHORIZED);
    assert_eq!(forbidden, StatusCode::FORBIDDEN);
    assert_eq!(a["error"], "Unauthorized");
    assert_eq!(b["error"], "Unauthorized");
}

#[tokio::test]
async fn store_failure_keeps_generic_message() {
    let err = AppError::Core(CoreError::failed("fetch", "projects"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "Failed to fetch projects");
}

#[tokio::test]
async fn every_failure_body_is_error_and_code() {
    for err in [
        AppError::BadRequest("Invalid search type".into()),
        AppError::Core(CoreError::failed("delete", "partner")),
        AppError::Core(CoreError::NotFound {
            entity: "Partner",
            id: "x".into(),
        }),
    ] {
        let (_, json) = error_to_response(err).await;
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert!(object["error"].is_string());
        assert!(object["code"].is_string());
    }
}
