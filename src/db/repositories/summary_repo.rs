// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily activity summaries, one row per (user, UTC date).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqliteConnection;

use crate::models::{DailyActivitySummary, SummaryDelta};

const COLUMNS: &str = "user_id, date, listening_minutes, activations_completed, \
                       articles_read, achievements_unlocked, updated_at";

pub struct SummaryRepo;

impl SummaryRepo {
    /// Add `delta` to the (user, date) row, creating it from the delta if absent.
    ///
    /// The increment happens inside SQLite, so concurrent bumps of the same
    /// row cannot lose updates and the unique key keeps it to one row.
    pub async fn bump(
        conn: &mut SqliteConnection,
        user_id: &str,
        date: NaiveDate,
        delta: &SummaryDelta,
        now: DateTime<Utc>,
    ) -> Result<DailyActivitySummary, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_activity_summaries \
                 (user_id, date, listening_minutes, activations_completed, \
                  articles_read, achievements_unlocked, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (user_id, date) DO UPDATE \
             SET listening_minutes = daily_activity_summaries.listening_minutes + excluded.listening_minutes, \
                 activations_completed = daily_activity_summaries.activations_completed + excluded.activations_completed, \
                 articles_read = daily_activity_summaries.articles_read + excluded.articles_read, \
                 achievements_unlocked = daily_activity_summaries.achievements_unlocked + excluded.achievements_unlocked, \
                 updated_at = excluded.updated_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyActivitySummary>(&query)
            .bind(user_id)
            .bind(date)
            .bind(delta.listening_minutes.unwrap_or(0))
            .bind(delta.activations_completed.unwrap_or(0))
            .bind(delta.articles_read.unwrap_or(0))
            .bind(delta.achievements_unlocked.unwrap_or(0))
            .bind(now)
            .fetch_one(conn)
            .await
    }

    pub async fn find(
        conn: &mut SqliteConnection,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyActivitySummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_activity_summaries WHERE user_id = ? AND date = ?"
        );
        sqlx::query_as::<_, DailyActivitySummary>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_optional(conn)
            .await
    }

    /// Rows dated `since` or later, newest first.
    pub async fn list_since(
        conn: &mut SqliteConnection,
        user_id: &str,
        since: NaiveDate,
    ) -> Result<Vec<DailyActivitySummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_activity_summaries \
             WHERE user_id = ? AND date >= ? \
             ORDER BY date DESC"
        );
        sqlx::query_as::<_, DailyActivitySummary>(&query)
            .bind(user_id)
            .bind(since)
            .fetch_all(conn)
            .await
    }

    /// Number of rows for the user. Used to check the one-row-per-day key.
    pub async fn count_for_user(
        conn: &mut SqliteConnection,
        user_id: &str,
    ) -> Result<u32, sqlx::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM daily_activity_summaries WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(conn)
                .await?;
        Ok(super::count_to_u32(count))
    }
}
