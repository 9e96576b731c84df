// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    Achievement, AchievementStatus, AchievementType, DailyActivitySummary, Favorite,
    ProgressOverview, ProgressReport, Role, User, UserProgress,
};
use crate::services::activity::STREAK_WINDOW;
use crate::services::progress::DEFAULT_PROGRESS_LIMIT;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/progress", post(record_progress).get(list_progress))
        .route("/api/progress/{activation_id}", get(get_progress))
        .route("/api/stats/streak", get(get_streak))
        .route("/api/stats/daily", get(get_daily_summaries))
        .route("/api/achievements", get(get_achievements))
        .route("/api/articles/{article_id}/read", post(record_article_read))
        .route("/api/favorites", get(list_favorites))
        .route("/api/favorites/{activation_id}", post(toggle_favorite))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_listening_minutes: i64,
    pub last_active_at: Option<String>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            total_listening_minutes: user.total_listening_minutes,
            last_active_at: user.last_active_at.map(format_utc_rfc3339),
            created_at: format_utc_rfc3339(user.created_at),
        }
    }
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state.accounts.get(&user.user_id).await?;
    Ok(Json(profile.into()))
}

// ─── Progress ────────────────────────────────────────────────

/// Playback report. Accepts the camelCase names the web player sends.
#[derive(Deserialize, Validate)]
pub struct ProgressRequest {
    #[serde(alias = "activationId")]
    #[validate(length(min = 1, max = 128))]
    pub activation_id: String,
    /// Signed so negatives reach validation; the upper bound is `MAX_PROGRESS_SECONDS`.
    #[serde(alias = "progressSeconds")]
    #[validate(range(min = 0, max = 86_400))]
    pub progress_seconds: i64,
    #[serde(alias = "isCompleted", default)]
    pub is_completed: bool,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressView {
    pub activation_id: String,
    pub progress_seconds: u32,
    pub is_completed: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub listen_count: i64,
    pub last_listened_at: String,
}

impl From<UserProgress> for ProgressView {
    fn from(p: UserProgress) -> Self {
        Self {
            activation_id: p.activation_id,
            progress_seconds: p.progress_seconds,
            is_completed: p.is_completed,
            listen_count: p.listen_count,
            last_listened_at: format_utc_rfc3339(p.last_listened_at),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AchievementView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub achievement_type: AchievementType,
    pub milestone: u32,
    pub icon: Option<String>,
}

impl From<Achievement> for AchievementView {
    fn from(a: Achievement) -> Self {
        Self {
            id: a.id,
            name: a.name,
            description: a.description,
            achievement_type: a.achievement_type,
            milestone: a.milestone,
            icon: a.icon,
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecordProgressResponse {
    pub success: bool,
    pub progress: ProgressView,
    pub unlocked_achievements: Vec<AchievementView>,
}

/// Record a playback report for the session user.
async fn record_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ProgressRequest>,
) -> Result<Json<RecordProgressResponse>> {
    body.validate()?;

    let progress_seconds = u32::try_from(body.progress_seconds)
        .map_err(|_| AppError::BadRequest("progress_seconds out of range".to_string()))?;
    let report = ProgressReport::new(progress_seconds, body.is_completed);

    let outcome = state
        .progress
        .record_progress(&user.user_id, &body.activation_id, report)
        .await?;

    Ok(Json(RecordProgressResponse {
        success: true,
        progress: outcome.progress.into(),
        unlocked_achievements: outcome.unlocked.into_iter().map(Into::into).collect(),
    }))
}

#[derive(Deserialize)]
struct ProgressListQuery {
    #[serde(default = "default_progress_limit")]
    limit: u32,
}

fn default_progress_limit() -> u32 {
    DEFAULT_PROGRESS_LIMIT
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressOverviewView {
    pub activation_id: String,
    pub title: String,
    pub duration_seconds: u32,
    pub progress_seconds: u32,
    pub is_completed: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub listen_count: i64,
    pub last_listened_at: String,
}

impl From<ProgressOverview> for ProgressOverviewView {
    fn from(p: ProgressOverview) -> Self {
        Self {
            activation_id: p.activation_id,
            title: p.title,
            duration_seconds: p.duration_seconds,
            progress_seconds: p.progress_seconds,
            is_completed: p.is_completed,
            listen_count: p.listen_count,
            last_listened_at: format_utc_rfc3339(p.last_listened_at),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressListResponse {
    pub progress: Vec<ProgressOverviewView>,
}

async fn list_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ProgressListQuery>,
) -> Result<Json<ProgressListResponse>> {
    let rows = state.progress.list_progress(&user.user_id, params.limit).await?;
    Ok(Json(ProgressListResponse {
        progress: rows.into_iter().map(Into::into).collect(),
    }))
}

async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activation_id): Path<String>,
) -> Result<Json<ProgressView>> {
    let progress = state.progress.get_progress(&user.user_id, &activation_id).await?;
    Ok(Json(progress.into()))
}

// ─── Stats ───────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StreakResponse {
    /// Distinct active days among the most recent `window` progress rows
    pub streak_days: u32,
    pub window: u32,
}

async fn get_streak(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<StreakResponse>> {
    let streak_days = state.activity.streak_days(&user.user_id).await?;
    Ok(Json(StreakResponse {
        streak_days,
        window: STREAK_WINDOW,
    }))
}

#[derive(Deserialize, Validate)]
struct DailyQuery {
    #[serde(default = "default_days")]
    #[validate(range(min = 1, max = 90))]
    days: u32,
}

fn default_days() -> u32 {
    7
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailySummaryView {
    /// UTC calendar date, YYYY-MM-DD
    pub date: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub listening_minutes: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub activations_completed: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub articles_read: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub achievements_unlocked: i64,
}

impl From<DailyActivitySummary> for DailySummaryView {
    fn from(s: DailyActivitySummary) -> Self {
        Self {
            date: s.date.format("%Y-%m-%d").to_string(),
            listening_minutes: s.listening_minutes,
            activations_completed: s.activations_completed,
            articles_read: s.articles_read,
            achievements_unlocked: s.achievements_unlocked,
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailySummariesResponse {
    pub days: Vec<DailySummaryView>,
}

async fn get_daily_summaries(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<DailyQuery>,
) -> Result<Json<DailySummariesResponse>> {
    params.validate()?;
    let rows = state
        .activity
        .recent_summaries(&user.user_id, params.days)
        .await?;
    Ok(Json(DailySummariesResponse {
        days: rows.into_iter().map(Into::into).collect(),
    }))
}

// ─── Achievements ────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AchievementStatusView {
    #[serde(flatten)]
    pub achievement: AchievementView,
    pub unlocked: bool,
    pub unlocked_at: Option<String>,
}

impl From<AchievementStatus> for AchievementStatusView {
    fn from(s: AchievementStatus) -> Self {
        Self {
            achievement: s.achievement.into(),
            unlocked: s.unlocked_at.is_some(),
            unlocked_at: s.unlocked_at.map(format_utc_rfc3339),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AchievementsResponse {
    pub achievements: Vec<AchievementStatusView>,
}

async fn get_achievements(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AchievementsResponse>> {
    let rows = state.achievements.achievements_for_user(&user.user_id).await?;
    Ok(Json(AchievementsResponse {
        achievements: rows.into_iter().map(Into::into).collect(),
    }))
}

// ─── Articles ────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ArticleReadResponse {
    pub success: bool,
    /// Articles read today, this one included
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub articles_read_today: i64,
}

async fn record_article_read(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(article_id): Path<String>,
) -> Result<Json<ArticleReadResponse>> {
    if article_id.is_empty() || article_id.len() > 128 {
        return Err(AppError::BadRequest("invalid article id".to_string()));
    }

    let summary = state
        .activity
        .record_article_read(&user.user_id, &article_id)
        .await?;

    Ok(Json(ArticleReadResponse {
        success: true,
        articles_read_today: summary.articles_read,
    }))
}

// ─── Favorites ───────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FavoriteView {
    pub activation_id: String,
    pub title: String,
    pub duration_seconds: u32,
    pub created_at: String,
}

impl From<Favorite> for FavoriteView {
    fn from(f: Favorite) -> Self {
        Self {
            activation_id: f.activation_id,
            title: f.title,
            duration_seconds: f.duration_seconds,
            created_at: format_utc_rfc3339(f.created_at),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteView>,
}

async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<FavoritesResponse>> {
    let rows = state.favorites.list(&user.user_id).await?;
    Ok(Json(FavoritesResponse {
        favorites: rows.into_iter().map(Into::into).collect(),
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ToggleFavoriteResponse {
    pub activation_id: String,
    pub is_favorite: bool,
}

async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activation_id): Path<String>,
) -> Result<Json<ToggleFavoriteResponse>> {
    let is_favorite = state.favorites.toggle(&user.user_id, &activation_id).await?;
    Ok(Json(ToggleFavoriteResponse {
        activation_id,
        is_favorite,
    }))
}
