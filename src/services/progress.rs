// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Listening progress tracking.
//!
//! A progress report is applied in one write transaction:
//! 1. Upsert the (user, activation) progress row
//! 2. On completion: evaluate achievements, log the completion, bump the
//!    daily summary and credit the user's listening total
//! 3. Otherwise: log the partial listen

use chrono::Utc;

use crate::db::{ActivationRepo, ActivityLogRepo, Database, ProgressRepo, SummaryRepo, UserRepo};
use crate::error::{AppError, Result};
use crate::models::{
    Achievement, NewActivityLogEntry, ProgressOverview, ProgressReport, SummaryDelta,
    UserProgress, MAX_PROGRESS_SECONDS,
};
use crate::services::AchievementEvaluator;
use crate::time_utils::calendar_day;

/// Default and maximum size of a progress listing.
pub const DEFAULT_PROGRESS_LIMIT: u32 = 50;
pub const MAX_PROGRESS_LIMIT: u32 = 200;

/// Result of applying one report.
#[derive(Debug, Clone)]
pub struct ProgressOutcome {
    pub progress: UserProgress,
    /// Achievements unlocked by this report (empty unless it was a completion)
    pub unlocked: Vec<Achievement>,
}

#[derive(Clone)]
pub struct ProgressTracker {
    db: Database,
}

impl ProgressTracker {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Apply a playback report for `user_id` on `activation_id`.
    pub async fn record_progress(
        &self,
        user_id: &str,
        activation_id: &str,
        report: ProgressReport,
    ) -> Result<ProgressOutcome> {
        if report.progress_seconds > MAX_PROGRESS_SECONDS {
            return Err(AppError::BadRequest(format!(
                "progress_seconds must be at most {}",
                MAX_PROGRESS_SECONDS
            )));
        }

        let now = Utc::now();
        let mut tx = self.db.begin_write().await?;

        if !UserRepo::exists(&mut tx, user_id).await? {
            return Err(AppError::NotFound(format!("user {}", user_id)));
        }
        if !ActivationRepo::exists(&mut tx, activation_id).await? {
            return Err(AppError::NotFound(format!("activation {}", activation_id)));
        }

        let progress = ProgressRepo::upsert(&mut tx, user_id, activation_id, &report, now).await?;

        let unlocked = if report.is_completed {
            let unlocked = AchievementEvaluator::unlock_qualifying(&mut tx, user_id, now).await?;

            let entry = NewActivityLogEntry::activation_completed(
                user_id,
                activation_id,
                report.progress_seconds,
            );
            ActivityLogRepo::append(&mut tx, &entry, now).await?;

            let minutes = report.listening_minutes();
            let delta = SummaryDelta::default()
                .with_activations_completed(1)
                .with_listening_minutes(minutes);
            SummaryRepo::bump(&mut tx, user_id, calendar_day(now), &delta, now).await?;
            UserRepo::record_listening(&mut tx, user_id, minutes, now).await?;

            unlocked
        } else {
            let entry = NewActivityLogEntry::activation_progress(
                user_id,
                activation_id,
                report.progress_seconds,
            );
            ActivityLogRepo::append(&mut tx, &entry, now).await?;
            Vec::new()
        };

        tx.commit().await?;

        tracing::info!(
            user_id,
            activation_id,
            progress_seconds = report.progress_seconds,
            is_completed = report.is_completed,
            listen_count = progress.listen_count,
            unlocked = unlocked.len(),
            "Progress recorded"
        );

        Ok(ProgressOutcome { progress, unlocked })
    }

    pub async fn get_progress(&self, user_id: &str, activation_id: &str) -> Result<UserProgress> {
        let mut conn = self.db.acquire().await?;
        ProgressRepo::find(&mut conn, user_id, activation_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("progress for activation {}", activation_id)))
    }

    /// Most recently listened first. `limit` is clamped to [`MAX_PROGRESS_LIMIT`].
    pub async fn list_progress(&self, user_id: &str, limit: u32) -> Result<Vec<ProgressOverview>> {
        let mut conn = self.db.acquire().await?;
        let limit = limit.clamp(1, MAX_PROGRESS_LIMIT);
        Ok(ProgressRepo::list_for_user(&mut conn, user_id, limit).await?)
    }
}
