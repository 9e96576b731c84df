// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use chrono::Utc;
use std::sync::Arc;
use ulepszenia_api::config::Config;
use ulepszenia_api::db::{AchievementRepo, ActivationRepo, Database, UserRepo};
use ulepszenia_api::middleware::auth::create_jwt;
use ulepszenia_api::models::{AchievementInput, AchievementType, ActivationInput, NewUser, Role};
use ulepszenia_api::routes::create_router;
use ulepszenia_api::AppState;

/// Fresh in-memory database with migrations applied.
#[allow(dead_code)]
pub async fn test_db() -> Database {
    Database::in_memory()
        .await
        .expect("Failed to open in-memory database")
}

/// Create a test app backed by a private in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::default(), test_db().await));
    (create_router(state.clone()), state)
}

/// Session token for `user_id` signed with the test key.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, role: Role) -> String {
    create_jwt(user_id, role, &Config::default().jwt_signing_key, 1).expect("JWT creation")
}

/// Insert a user directly, skipping password hashing.
#[allow(dead_code)]
pub async fn seed_user(db: &Database, id: &str, role: Role) {
    let new_user = NewUser {
        email: format!("{id}@example.com"),
        display_name: format!("User {id}"),
        password_hash: "unused".to_string(),
        role,
    };
    let mut conn = db.acquire().await.unwrap();
    UserRepo::insert(&mut conn, id, &new_user, Utc::now())
        .await
        .unwrap();
}

#[allow(dead_code)]
pub async fn seed_activation(db: &Database, id: &str, duration_seconds: u32) {
    let input = ActivationInput {
        title: format!("Activation {id}"),
        category_id: Some("breathing".to_string()),
        duration_seconds,
    };
    let mut conn = db.acquire().await.unwrap();
    ActivationRepo::upsert(&mut conn, id, &input, Utc::now())
        .await
        .unwrap();
}

#[allow(dead_code)]
pub async fn seed_achievement(
    db: &Database,
    id: &str,
    achievement_type: AchievementType,
    milestone: u32,
) {
    let input = AchievementInput {
        name: format!("Milestone {id}"),
        description: String::new(),
        achievement_type,
        milestone,
        icon: None,
    };
    let mut conn = db.acquire().await.unwrap();
    AchievementRepo::upsert(&mut conn, id, &input, Utc::now())
        .await
        .unwrap();
}

/// Build a request carrying a Bearer token and an optional JSON body.
#[allow(dead_code)]
pub fn authed_request(
    method: &str,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
