// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Achievement evaluation.
//!
//! Only `activation_count` achievements are evaluated: the number of
//! activations the user has completed is compared with each milestone.
//! Unlocks are permanent and each one is logged and counted in the day's
//! summary exactly once.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::db::{AchievementRepo, ActivityLogRepo, Database, ProgressRepo, SummaryRepo, UserRepo};
use crate::error::{AppError, Result};
use crate::models::achievement::newly_qualified;
use crate::models::{
    Achievement, AchievementStatus, AchievementType, NewActivityLogEntry, SummaryDelta,
};
use crate::time_utils::calendar_day;

#[derive(Clone)]
pub struct AchievementEvaluator {
    db: Database,
}

impl AchievementEvaluator {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Unlock every qualifying achievement the user does not hold yet.
    ///
    /// Idempotent: a second call with no new completions unlocks nothing.
    pub async fn evaluate_and_unlock(&self, user_id: &str) -> Result<Vec<Achievement>> {
        let mut tx = self.db.begin_write().await?;

        if !UserRepo::exists(&mut tx, user_id).await? {
            return Err(AppError::NotFound(format!("user {}", user_id)));
        }

        let unlocked = Self::unlock_qualifying(&mut tx, user_id, Utc::now()).await?;
        tx.commit().await?;

        Ok(unlocked)
    }

    /// Evaluation on a caller-owned connection, normally the transaction of a
    /// completion report.
    pub(crate) async fn unlock_qualifying(
        conn: &mut SqliteConnection,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Achievement>> {
        let completed = ProgressRepo::count_completed(&mut *conn, user_id).await?;
        let catalog =
            AchievementRepo::list_by_type(&mut *conn, AchievementType::ActivationCount).await?;
        let held = AchievementRepo::unlocked_ids(&mut *conn, user_id).await?;

        let mut unlocked = Vec::new();
        for achievement in newly_qualified(&catalog, completed, &held) {
            // A concurrent evaluation may have inserted the pair first.
            if !AchievementRepo::insert_unlock(&mut *conn, user_id, &achievement.id, now).await? {
                continue;
            }

            let entry =
                NewActivityLogEntry::achievement_unlocked(user_id, &achievement.id, &achievement.name);
            ActivityLogRepo::append(&mut *conn, &entry, now).await?;

            let delta = SummaryDelta::default().with_achievements_unlocked(1);
            SummaryRepo::bump(&mut *conn, user_id, calendar_day(now), &delta, now).await?;

            tracing::info!(
                user_id,
                achievement_id = %achievement.id,
                milestone = achievement.milestone,
                completed,
                "Achievement unlocked"
            );
            unlocked.push(achievement.clone());
        }

        Ok(unlocked)
    }

    /// Full catalog annotated with the user's unlock times.
    pub async fn achievements_for_user(&self, user_id: &str) -> Result<Vec<AchievementStatus>> {
        let mut conn = self.db.acquire().await?;
        Ok(AchievementRepo::list_with_status(&mut conn, user_id).await?)
    }
}
