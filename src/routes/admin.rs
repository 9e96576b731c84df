// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin-only routes: catalog maintenance and the audit log.
//! `require_auth` and `require_admin` are applied in routes/mod.rs.

use crate::error::{AppError, Result};
use crate::models::{
    AchievementInput, AchievementType, Activation, ActivationInput, ActivityAction,
    ActivityLogEntry, EntityType,
};
use crate::routes::api::AchievementView;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const DEFAULT_LOG_PAGE: u32 = 50;
const MAX_LOG_PAGE: u32 = 200;
const CURSOR_PREFIX: &str = "log:";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/activations/{id}", put(put_activation))
        .route("/api/admin/achievements/{id}", put(put_achievement))
        .route("/api/admin/activity-log", get(get_activity_log))
        .route(
            "/api/admin/users/{user_id}/achievements/evaluate",
            post(evaluate_achievements),
        )
}

// ─── Catalog ─────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct ActivationRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 128))]
    pub category_id: Option<String>,
    pub duration_seconds: u32,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivationView {
    pub id: String,
    pub title: String,
    pub category_id: Option<String>,
    pub duration_seconds: u32,
    pub updated_at: String,
}

impl From<Activation> for ActivationView {
    fn from(a: Activation) -> Self {
        Self {
            id: a.id,
            title: a.title,
            category_id: a.category_id,
            duration_seconds: a.duration_seconds,
            updated_at: format_utc_rfc3339(a.updated_at),
        }
    }
}

async fn put_activation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ActivationRequest>,
) -> Result<Json<ActivationView>> {
    body.validate()?;
    check_catalog_id(&id)?;

    let input = ActivationInput {
        title: body.title,
        category_id: body.category_id,
        duration_seconds: body.duration_seconds,
    };
    let activation = state.catalog.upsert_activation(&id, &input).await?;
    Ok(Json(activation.into()))
}

#[derive(Deserialize, Validate)]
pub struct AchievementRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
    pub achievement_type: AchievementType,
    pub milestone: u32,
    #[serde(default)]
    pub icon: Option<String>,
}

async fn put_achievement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<AchievementRequest>,
) -> Result<Json<AchievementView>> {
    body.validate()?;
    check_catalog_id(&id)?;

    let input = AchievementInput {
        name: body.name,
        description: body.description,
        achievement_type: body.achievement_type,
        milestone: body.milestone,
        icon: body.icon,
    };
    let achievement = state.catalog.upsert_achievement(&id, &input).await?;
    Ok(Json(achievement.into()))
}

fn check_catalog_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id.len() <= 128
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "id must be 1-128 characters of [A-Za-z0-9_-]".to_string(),
        ))
    }
}

// ─── Activity Log ────────────────────────────────────────────

#[derive(Deserialize)]
struct ActivityLogQuery {
    user_id: Option<String>,
    /// Cursor for forward pagination (opaque token).
    cursor: Option<String>,
    #[serde(default = "default_log_page")]
    limit: u32,
}

fn default_log_page() -> u32 {
    DEFAULT_LOG_PAGE
}

fn parse_cursor(cursor: Option<&str>) -> Result<Option<i64>> {
    cursor
        .map(|raw| {
            let invalid_cursor = || AppError::BadRequest("Invalid 'cursor' parameter".to_string());

            let decoded = URL_SAFE_NO_PAD.decode(raw).map_err(|_| invalid_cursor())?;
            let decoded_str = std::str::from_utf8(&decoded).map_err(|_| invalid_cursor())?;
            let id = decoded_str
                .strip_prefix(CURSOR_PREFIX)
                .ok_or_else(invalid_cursor)?
                .parse::<i64>()
                .map_err(|_| invalid_cursor())?;

            if id <= 0 {
                return Err(invalid_cursor());
            }
            Ok(id)
        })
        .transpose()
}

fn encode_cursor(last_id: i64) -> String {
    URL_SAFE_NO_PAD.encode(format!("{CURSOR_PREFIX}{last_id}"))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityLogView {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    pub user_id: String,
    pub action: ActivityAction,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "Record<string, unknown>"))]
    pub metadata: serde_json::Value,
    pub created_at: String,
}

impl From<ActivityLogEntry> for ActivityLogView {
    fn from(e: ActivityLogEntry) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            action: e.action,
            entity_type: e.entity_type,
            entity_id: e.entity_id,
            metadata: e.metadata.0,
            created_at: format_utc_rfc3339(e.created_at),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityLogResponse {
    pub entries: Vec<ActivityLogView>,
    pub next_cursor: Option<String>,
}

/// Audit log, newest first, optionally for a single user.
async fn get_activity_log(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivityLogQuery>,
) -> Result<Json<ActivityLogResponse>> {
    let limit = params.limit.clamp(1, MAX_LOG_PAGE);
    let before_id = parse_cursor(params.cursor.as_deref())?;

    // Fetch one extra row to learn whether another page exists.
    let mut entries = state
        .activity
        .activity_log_page(params.user_id.as_deref(), before_id, limit.saturating_add(1))
        .await?;

    let has_more = entries.len() > limit as usize;
    if has_more {
        entries.truncate(limit as usize);
    }
    let next_cursor = if has_more {
        entries.last().map(|e| encode_cursor(e.id))
    } else {
        None
    };

    Ok(Json(ActivityLogResponse {
        entries: entries.into_iter().map(Into::into).collect(),
        next_cursor,
    }))
}

// ─── Evaluation ──────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EvaluateResponse {
    pub user_id: String,
    pub unlocked: Vec<AchievementView>,
}

/// Re-run achievement evaluation, e.g. after lowering a milestone.
async fn evaluate_achievements(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<EvaluateResponse>> {
    let unlocked = state.achievements.evaluate_and_unlock(&user_id).await?;
    tracing::info!(
        user_id = %user_id,
        unlocked = unlocked.len(),
        "Admin re-evaluated achievements"
    );

    Ok(Json(EvaluateResponse {
        user_id,
        unlocked: unlocked.into_iter().map(Into::into).collect(),
    }))
}
