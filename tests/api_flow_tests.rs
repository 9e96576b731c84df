// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end flows through the HTTP API.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;
use ulepszenia_api::models::{AchievementType, Role};

mod common;

#[tokio::test]
async fn test_completion_flow() {
    let (app, state) = common::create_test_app().await;
    common::seed_user(&state.db, "u1", Role::User).await;
    common::seed_activation(&state.db, "a1", 600).await;
    common::seed_achievement(&state.db, "first", AchievementType::ActivationCount, 1).await;
    let token = common::create_test_jwt("u1", Role::User);

    let response = app
        .clone()
        .oneshot(common::authed_request(
            "POST",
            "/api/progress",
            &token,
            Some(json!({ "activationId": "a1", "progressSeconds": 125, "isCompleted": true })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::read_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["progress"]["listen_count"], 1);
    assert_eq!(body["unlocked_achievements"][0]["id"], "first");

    let response = app
        .clone()
        .oneshot(common::authed_request("GET", "/api/stats/daily?days=1", &token, None))
        .await
        .unwrap();
    let body = common::read_json(response).await;
    assert_eq!(body["days"][0]["listening_minutes"], 2);
    assert_eq!(body["days"][0]["activations_completed"], 1);
    assert_eq!(body["days"][0]["achievements_unlocked"], 1);

    let response = app
        .clone()
        .oneshot(common::authed_request("GET", "/api/achievements", &token, None))
        .await
        .unwrap();
    let body = common::read_json(response).await;
    assert_eq!(body["achievements"][0]["unlocked"], true);
    assert_eq!(body["achievements"][0]["achievement_type"], "activation_count");

    let response = app
        .clone()
        .oneshot(common::authed_request("GET", "/api/progress/a1", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(common::authed_request("GET", "/api/me", &token, None))
        .await
        .unwrap();
    let body = common::read_json(response).await;
    assert_eq!(body["total_listening_minutes"], 2);
}

#[tokio::test]
async fn test_progress_listing_is_most_recent_first() {
    let (app, state) = common::create_test_app().await;
    common::seed_user(&state.db, "u1", Role::User).await;
    common::seed_activation(&state.db, "a1", 300).await;
    common::seed_activation(&state.db, "a2", 300).await;
    let token = common::create_test_jwt("u1", Role::User);

    for id in ["a1", "a2"] {
        let response = app
            .clone()
            .oneshot(common::authed_request(
                "POST",
                "/api/progress",
                &token,
                Some(json!({ "activationId": id, "progressSeconds": 30 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(common::authed_request("GET", "/api/progress?limit=10", &token, None))
        .await
        .unwrap();
    let body = common::read_json(response).await;
    let rows = body["progress"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["activation_id"], "a2");
    assert_eq!(rows[0]["is_completed"], false);
}

#[tokio::test]
async fn test_article_read_counts() {
    let (app, state) = common::create_test_app().await;
    common::seed_user(&state.db, "u1", Role::User).await;
    let token = common::create_test_jwt("u1", Role::User);

    let mut last = serde_json::Value::Null;
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(common::authed_request(
                "POST",
                "/api/articles/breathing-101/read",
                &token,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        last = common::read_json(response).await;
    }
    assert_eq!(last["articles_read_today"], 2);
}

#[tokio::test]
async fn test_favorite_toggle() {
    let (app, state) = common::create_test_app().await;
    common::seed_user(&state.db, "u1", Role::User).await;
    common::seed_activation(&state.db, "a1", 300).await;
    let token = common::create_test_jwt("u1", Role::User);

    let toggle = || {
        app.clone().oneshot(common::authed_request(
            "POST",
            "/api/favorites/a1",
            &token,
            None,
        ))
    };

    let body = common::read_json(toggle().await.unwrap()).await;
    assert_eq!(body["is_favorite"], true);

    let response = app
        .clone()
        .oneshot(common::authed_request("GET", "/api/favorites", &token, None))
        .await
        .unwrap();
    let list = common::read_json(response).await;
    assert_eq!(list["favorites"][0]["activation_id"], "a1");

    let body = common::read_json(toggle().await.unwrap()).await;
    assert_eq!(body["is_favorite"], false);

    let response = app
        .clone()
        .oneshot(common::authed_request(
            "POST",
            "/api/favorites/missing",
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_catalog_and_log_pagination() {
    let (app, state) = common::create_test_app().await;
    common::seed_user(&state.db, "admin", Role::Admin).await;
    common::seed_user(&state.db, "u1", Role::User).await;
    let admin = common::create_test_jwt("admin", Role::Admin);
    let user = common::create_test_jwt("u1", Role::User);

    let response = app
        .clone()
        .oneshot(common::authed_request(
            "PUT",
            "/api/admin/activations/calm-01",
            &admin,
            Some(json!({ "title": "Calm", "duration_seconds": 300 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(common::authed_request(
                "POST",
                "/api/progress",
                &user,
                Some(json!({ "activationId": "calm-01", "progressSeconds": 20 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(common::authed_request(
            "GET",
            "/api/admin/activity-log?user_id=u1&limit=2",
            &admin,
            None,
        ))
        .await
        .unwrap();
    let page = common::read_json(response).await;
    assert_eq!(page["entries"].as_array().unwrap().len(), 2);
    let cursor = page["next_cursor"].as_str().unwrap().to_string();

    let response = app
        .oneshot(common::authed_request(
            "GET",
            &format!("/api/admin/activity-log?user_id=u1&limit=2&cursor={cursor}"),
            &admin,
            None,
        ))
        .await
        .unwrap();
    let page = common::read_json(response).await;
    let entries = page["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "activation_progress");
    assert!(page["next_cursor"].is_null());
}
