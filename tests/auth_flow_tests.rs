// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Register, login and logout through the HTTP API.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;
use ulepszenia_api::middleware::auth::SESSION_COOKIE;

mod common;

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn set_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_register_sets_session_cookie() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(json_request(
            "/auth/register",
            json!({ "email": "Ola@Example.com", "displayName": "Ola", "password": "correct horse" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(!cookie.contains("Secure"));

    let body = common::read_json(response).await;
    assert_eq!(body["user"]["email"], "ola@example.com");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let (app, _) = common::create_test_app().await;
    let register = json!({ "email": "ola@example.com", "displayName": "Ola", "password": "correct horse" });

    let first = app
        .clone()
        .oneshot(json_request("/auth/register", register.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request(
            "/auth/register",
            json!({ "email": "OLA@example.com", "displayName": "Ola 2", "password": "another one" }),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_short_password_rejected() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(json_request(
            "/auth/register",
            json!({ "email": "ola@example.com", "displayName": "Ola", "password": "short" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_and_logout() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "/auth/register",
            json!({ "email": "ola@example.com", "displayName": "Ola", "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let wrong = app
        .clone()
        .oneshot(json_request(
            "/auth/login",
            json!({ "email": "ola@example.com", "password": "wrong horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let unknown = app
        .clone()
        .oneshot(json_request(
            "/auth/login",
            json!({ "email": "nobody@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);

    let login = app
        .clone()
        .oneshot(json_request(
            "/auth/login",
            json!({ "email": "ola@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
    let token = common::read_json(login).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let me = app
        .clone()
        .oneshot(common::authed_request("GET", "/api/me", &token, None))
        .await
        .unwrap();
    assert_eq!(me.status(), StatusCode::OK);

    let logout = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);
    let cookie = set_cookie(&logout);
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=;")));
    assert!(cookie.contains("Max-Age=0"));
}
