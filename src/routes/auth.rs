// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential authentication routes.
//!
//! A successful register or login sets the HttpOnly session cookie and also
//! returns the token in the body for clients that send a Bearer header.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::User;
use crate::routes::api::UserResponse;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[serde(alias = "displayName")]
    #[validate(length(min = 1, max = 80))]
    pub display_name: String,
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Create an account and start a session.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<SessionResponse>)> {
    body.validate()?;

    let user = state
        .accounts
        .register(&body.email, &body.display_name, &body.password)
        .await?;

    let (jar, session) = start_session(&state.config, jar, user)?;
    Ok((StatusCode::CREATED, jar, Json(session)))
}

/// Check credentials and start a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    body.validate().map_err(|_| AppError::Unauthorized)?;

    let user = state.accounts.authenticate(&body.email, &body.password).await?;
    tracing::info!(user_id = %user.id, "Login successful");

    let (jar, session) = start_session(&state.config, jar, user)?;
    Ok((jar, Json(session)))
}

/// Clear the session cookie. Tokens are stateless, so nothing else to revoke.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (StatusCode, CookieJar) {
    let removal = session_cookie(&state.config, String::new(), time::Duration::ZERO);
    (StatusCode::NO_CONTENT, jar.add(removal))
}

fn start_session(
    config: &Config,
    jar: CookieJar,
    user: User,
) -> Result<(CookieJar, SessionResponse)> {
    let token = create_jwt(
        &user.id,
        user.role,
        &config.jwt_signing_key,
        config.session_ttl_days,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let max_age = time::Duration::days(config.session_ttl_days);
    let cookie = session_cookie(config, token.clone(), max_age);

    Ok((
        jar.add(cookie),
        SessionResponse {
            user: user.into(),
            token,
        },
    ))
}

/// Session cookie attributes. `Secure` is set whenever the frontend is
/// served over https.
fn session_cookie(config: &Config, value: String, max_age: time::Duration) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.frontend_url.starts_with("https://"))
        .max_age(max_age)
        .build()
}
