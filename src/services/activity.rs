// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity aggregation: streaks, daily summaries and the audit log.
//!
//! The streak figure is the number of distinct UTC days among the user's
//! most recent progress rows. It is not a count of consecutive days.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::db::{ActivityLogRepo, Database, ProgressRepo, SummaryRepo, UserRepo};
use crate::error::{AppError, Result};
use crate::models::{ActivityLogEntry, DailyActivitySummary, NewActivityLogEntry, SummaryDelta};
use crate::time_utils::{calendar_day, window_start};

/// Number of most recent progress rows considered for the streak.
pub const STREAK_WINDOW: u32 = 30;

/// Longest window served by `recent_summaries`.
pub const MAX_SUMMARY_DAYS: u32 = 90;

#[derive(Clone)]
pub struct ActivityAggregator {
    db: Database,
}

impl ActivityAggregator {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Distinct active days among the last [`STREAK_WINDOW`] progress rows.
    pub async fn streak_days(&self, user_id: &str) -> Result<u32> {
        let mut conn = self.db.acquire().await?;
        let times = ProgressRepo::recent_listen_times(&mut conn, user_id, STREAK_WINDOW).await?;
        Ok(distinct_active_days(&times))
    }

    /// Add `delta` to the user's summary for `date`, creating the row on
    /// first activity of the day.
    pub async fn bump_daily_summary(
        &self,
        user_id: &str,
        date: NaiveDate,
        delta: &SummaryDelta,
    ) -> Result<DailyActivitySummary> {
        let mut conn = self.db.acquire().await?;
        let summary = SummaryRepo::bump(&mut conn, user_id, date, delta, Utc::now()).await?;

        tracing::debug!(
            user_id,
            %date,
            listening_minutes = summary.listening_minutes,
            activations_completed = summary.activations_completed,
            "Daily summary updated"
        );
        Ok(summary)
    }

    /// Count an article read towards today's summary and log it.
    ///
    /// Article ids are opaque here; nothing checks that the article exists.
    pub async fn record_article_read(
        &self,
        user_id: &str,
        article_id: &str,
    ) -> Result<DailyActivitySummary> {
        let now = Utc::now();
        let mut tx = self.db.begin_write().await?;

        if !UserRepo::exists(&mut tx, user_id).await? {
            return Err(AppError::NotFound(format!("user {}", user_id)));
        }

        let entry = NewActivityLogEntry::article_read(user_id, article_id);
        ActivityLogRepo::append(&mut tx, &entry, now).await?;
        let delta = SummaryDelta::default().with_articles_read(1);
        let summary = SummaryRepo::bump(&mut tx, user_id, calendar_day(now), &delta, now).await?;
        tx.commit().await?;

        tracing::info!(user_id, article_id, "Article read recorded");
        Ok(summary)
    }

    /// Summaries for the last `days` UTC days (today included), newest first.
    pub async fn recent_summaries(
        &self,
        user_id: &str,
        days: u32,
    ) -> Result<Vec<DailyActivitySummary>> {
        if days == 0 || days > MAX_SUMMARY_DAYS {
            return Err(AppError::BadRequest(format!(
                "days must be between 1 and {}",
                MAX_SUMMARY_DAYS
            )));
        }
        let since = window_start(calendar_day(Utc::now()), days);

        let mut conn = self.db.acquire().await?;
        Ok(SummaryRepo::list_since(&mut conn, user_id, since).await?)
    }

    /// One page of the audit log, newest first.
    pub async fn activity_log_page(
        &self,
        user_id: Option<&str>,
        before_id: Option<i64>,
        limit: u32,
    ) -> Result<Vec<ActivityLogEntry>> {
        let mut conn = self.db.acquire().await?;
        Ok(ActivityLogRepo::list(&mut conn, user_id, before_id, limit).await?)
    }
}

/// Number of distinct UTC calendar days in `timestamps`.
pub fn distinct_active_days(timestamps: &[DateTime<Utc>]) -> u32 {
    let days: HashSet<NaiveDate> = timestamps.iter().copied().map(calendar_day).collect();
    u32::try_from(days.len()).unwrap_or(u32::MAX)
}
