// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Listening progress, one row per (user, activation).

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use super::count_to_u32;
use crate::models::{ProgressOverview, ProgressReport, UserProgress};

const COLUMNS: &str =
    "user_id, activation_id, progress_seconds, is_completed, listen_count, last_listened_at";

pub struct ProgressRepo;

impl ProgressRepo {
    /// Create or overwrite the (user, activation) row in one statement.
    ///
    /// `progress_seconds` and `is_completed` are replaced as reported;
    /// `listen_count` grows by one per completion report.
    pub async fn upsert(
        conn: &mut SqliteConnection,
        user_id: &str,
        activation_id: &str,
        report: &ProgressReport,
        now: DateTime<Utc>,
    ) -> Result<UserProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_progress \
                 (user_id, activation_id, progress_seconds, is_completed, listen_count, last_listened_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             ON CONFLICT (user_id, activation_id) DO UPDATE \
             SET progress_seconds = excluded.progress_seconds, \
                 is_completed = excluded.is_completed, \
                 listen_count = user_progress.listen_count + excluded.listen_count, \
                 last_listened_at = excluded.last_listened_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProgress>(&query)
            .bind(user_id)
            .bind(activation_id)
            .bind(report.progress_seconds)
            .bind(report.is_completed)
            .bind(report.listen_increment())
            .bind(now)
            .fetch_one(conn)
            .await
    }

    pub async fn find(
        conn: &mut SqliteConnection,
        user_id: &str,
        activation_id: &str,
    ) -> Result<Option<UserProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_progress WHERE user_id = ? AND activation_id = ?"
        );
        sqlx::query_as::<_, UserProgress>(&query)
            .bind(user_id)
            .bind(activation_id)
            .fetch_optional(conn)
            .await
    }

    /// Most recently listened first, joined with the activation.
    pub async fn list_for_user(
        conn: &mut SqliteConnection,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<ProgressOverview>, sqlx::Error> {
        sqlx::query_as::<_, ProgressOverview>(
            "SELECT p.activation_id, a.title, a.duration_seconds, p.progress_seconds, \
                    p.is_completed, p.listen_count, p.last_listened_at \
             FROM user_progress p \
             JOIN activations a ON a.id = p.activation_id \
             WHERE p.user_id = ? \
             ORDER BY p.last_listened_at DESC \
             LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(conn)
        .await
    }

    /// Number of activations the user has completed at least once.
    pub async fn count_completed(
        conn: &mut SqliteConnection,
        user_id: &str,
    ) -> Result<u32, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_progress WHERE user_id = ? AND is_completed = 1",
        )
        .bind(user_id)
        .fetch_one(conn)
        .await?;
        Ok(count_to_u32(count))
    }

    /// `last_listened_at` of the user's `limit` most recent rows.
    pub async fn recent_listen_times(
        conn: &mut SqliteConnection,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<DateTime<Utc>>, sqlx::Error> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT last_listened_at FROM user_progress \
             WHERE user_id = ? \
             ORDER BY last_listened_at DESC \
             LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(conn)
        .await
    }
}
