// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Achievement catalog and per-user unlock records.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::models::{Achievement, AchievementInput, AchievementStatus, AchievementType};

const COLUMNS: &str = "id, name, description, achievement_type, milestone, icon, created_at";

pub struct AchievementRepo;

impl AchievementRepo {
    /// Catalog entries of one type, lowest milestone first.
    pub async fn list_by_type(
        conn: &mut SqliteConnection,
        achievement_type: AchievementType,
    ) -> Result<Vec<Achievement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM achievements \
             WHERE achievement_type = ? \
             ORDER BY milestone, id"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(achievement_type)
            .fetch_all(conn)
            .await
    }

    /// Ids of the achievements the user already holds.
    pub async fn unlocked_ids(
        conn: &mut SqliteConnection,
        user_id: &str,
    ) -> Result<HashSet<String>, sqlx::Error> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT achievement_id FROM user_achievements WHERE user_id = ?")
                .bind(user_id)
                .fetch_all(conn)
                .await?;
        Ok(ids.into_iter().collect())
    }

    /// Record an unlock. Returns `false` when the pair already existed, in
    /// which case nothing was written.
    pub async fn insert_unlock(
        conn: &mut SqliteConnection,
        user_id: &str,
        achievement_id: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_achievements (user_id, achievement_id, unlocked_at) \
             VALUES (?, ?, ?) \
             ON CONFLICT (user_id, achievement_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(achievement_id)
        .bind(now)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Whole catalog with the user's unlock times.
    pub async fn list_with_status(
        conn: &mut SqliteConnection,
        user_id: &str,
    ) -> Result<Vec<AchievementStatus>, sqlx::Error> {
        sqlx::query_as::<_, AchievementStatus>(
            "SELECT a.id, a.name, a.description, a.achievement_type, a.milestone, a.icon, \
                    a.created_at, ua.unlocked_at \
             FROM achievements a \
             LEFT JOIN user_achievements ua \
                 ON ua.achievement_id = a.id AND ua.user_id = ? \
             ORDER BY a.achievement_type, a.milestone, a.id",
        )
        .bind(user_id)
        .fetch_all(conn)
        .await
    }

    pub async fn upsert(
        conn: &mut SqliteConnection,
        id: &str,
        input: &AchievementInput,
        now: DateTime<Utc>,
    ) -> Result<Achievement, sqlx::Error> {
        let query = format!(
            "INSERT INTO achievements \
                 (id, name, description, achievement_type, milestone, icon, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (id) DO UPDATE \
             SET name = excluded.name, \
                 description = excluded.description, \
                 achievement_type = excluded.achievement_type, \
                 milestone = excluded.milestone, \
                 icon = excluded.icon \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.achievement_type)
            .bind(input.milestone)
            .bind(&input.icon)
            .bind(now)
            .fetch_one(conn)
            .await
    }
}
