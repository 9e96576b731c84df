// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use ulepszenia_api::db::UserRepo;
use ulepszenia_api::error::AppError;
use ulepszenia_api::models::{NewUser, Role};

mod common;

#[test]
fn test_status_codes() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::InvalidToken, StatusCode::UNAUTHORIZED),
        (AppError::Forbidden, StatusCode::FORBIDDEN),
        (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
        (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
        (AppError::Conflict("x".into()), StatusCode::CONFLICT),
        (AppError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        (
            AppError::Internal(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];
    for (err, status) in cases {
        assert_eq!(err.into_response().status(), status);
    }
}

#[tokio::test]
async fn test_database_details_not_leaked() {
    let response = AppError::Database("no such table: secrets".into()).into_response();
    let body = common::read_json(response).await;
    assert_eq!(body["error"], "database_error");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_unique_violation_maps_to_conflict() {
    let db = common::test_db().await;
    common::seed_user(&db, "u1", Role::User).await;

    let duplicate = NewUser {
        email: "u1@example.com".to_string(),
        display_name: "Copy".to_string(),
        password_hash: "unused".to_string(),
        role: Role::User,
    };
    let mut conn = db.acquire().await.unwrap();
    let err: AppError = UserRepo::insert(&mut conn, "u2", &duplicate, chrono::Utc::now())
        .await
        .unwrap_err()
        .into();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_foreign_key_violation_maps_to_not_found() {
    let db = common::test_db().await;
    let mut conn = db.acquire().await.unwrap();

    let err: AppError = ulepszenia_api::db::FavoriteRepo::insert(
        &mut conn,
        "ghost",
        "missing",
        chrono::Utc::now(),
    )
    .await
    .unwrap_err()
    .into();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_validation_errors_name_fields() {
    use validator::Validate;

    #[derive(Validate)]
    struct Input {
        #[validate(length(min = 1))]
        name: String,
        #[validate(range(min = 1))]
        days: u32,
    }

    let err: AppError = Input {
        name: String::new(),
        days: 0,
    }
    .validate()
    .unwrap_err()
    .into();
    match err {
        AppError::BadRequest(msg) => assert_eq!(msg, "invalid fields: days, name"),
        other => panic!("unexpected error: {other:?}"),
    }
}
