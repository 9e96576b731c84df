// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;
use ulepszenia_api::models::Role;

mod common;

async fn app_with_user() -> (axum::Router, String) {
    let (app, state) = common::create_test_app().await;
    common::seed_user(&state.db, "u1", Role::User).await;
    common::seed_activation(&state.db, "a1", 600).await;
    (app, common::create_test_jwt("u1", Role::User))
}

#[tokio::test]
async fn test_negative_progress_rejected() {
    let (app, token) = app_with_user().await;

    let response = app
        .oneshot(common::authed_request(
            "POST",
            "/api/progress",
            &token,
            Some(json!({ "activationId": "a1", "progressSeconds": -5, "isCompleted": false })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::read_json(response).await;
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_oversized_progress_rejected() {
    let (app, token) = app_with_user().await;

    let response = app
        .oneshot(common::authed_request(
            "POST",
            "/api/progress",
            &token,
            Some(json!({ "activation_id": "a1", "progress_seconds": 5_000_000_000i64 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_progress_capped_at_one_day() {
    for (seconds, expected) in [(86_401, StatusCode::BAD_REQUEST), (86_400, StatusCode::OK)] {
        let (app, token) = app_with_user().await;
        let response = app
            .oneshot(common::authed_request(
                "POST",
                "/api/progress",
                &token,
                Some(json!({ "activationId": "a1", "progressSeconds": seconds, "isCompleted": true })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), expected, "progressSeconds={seconds}");
    }
}

#[tokio::test]
async fn test_empty_activation_id_rejected() {
    let (app, token) = app_with_user().await;

    let response = app
        .oneshot(common::authed_request(
            "POST",
            "/api/progress",
            &token,
            Some(json!({ "activationId": "", "progressSeconds": 10 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_activation_is_not_found() {
    let (app, token) = app_with_user().await;

    let response = app
        .oneshot(common::authed_request(
            "POST",
            "/api/progress",
            &token,
            Some(json!({ "activationId": "nope", "progressSeconds": 10, "isCompleted": true })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_daily_window_bounds() {
    for (days, expected) in [
        ("0", StatusCode::BAD_REQUEST),
        ("91", StatusCode::BAD_REQUEST),
        ("1", StatusCode::OK),
        ("90", StatusCode::OK),
    ] {
        let (app, token) = app_with_user().await;
        let response = app
            .oneshot(common::authed_request(
                "GET",
                &format!("/api/stats/daily?days={days}"),
                &token,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), expected, "days={days}");
    }
}

#[tokio::test]
async fn test_invalid_admin_cursor() {
    let (app, state) = common::create_test_app().await;
    common::seed_user(&state.db, "admin", Role::Admin).await;
    let token = common::create_test_jwt("admin", Role::Admin);

    let response = app
        .oneshot(common::authed_request(
            "GET",
            "/api/admin/activity-log?cursor=not-a-cursor!",
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_catalog_id() {
    let (app, state) = common::create_test_app().await;
    common::seed_user(&state.db, "admin", Role::Admin).await;
    let token = common::create_test_jwt("admin", Role::Admin);

    let response = app
        .oneshot(common::authed_request(
            "PUT",
            "/api/admin/activations/has%20space",
            &token,
            Some(json!({ "title": "Calm", "duration_seconds": 300 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
