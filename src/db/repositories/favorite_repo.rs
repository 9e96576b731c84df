// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorites, keyed by (user, activation).

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::models::Favorite;

pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Returns `false` if the favorite was already present.
    pub async fn insert(
        conn: &mut SqliteConnection,
        user_id: &str,
        activation_id: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO favorites (user_id, activation_id, created_at) VALUES (?, ?, ?) \
             ON CONFLICT (user_id, activation_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(activation_id)
        .bind(now)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Returns `false` if there was nothing to remove.
    pub async fn delete(
        conn: &mut SqliteConnection,
        user_id: &str,
        activation_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM favorites WHERE user_id = ? AND activation_id = ?")
                .bind(user_id)
                .bind(activation_id)
                .execute(conn)
                .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn list_for_user(
        conn: &mut SqliteConnection,
        user_id: &str,
    ) -> Result<Vec<Favorite>, sqlx::Error> {
        sqlx::query_as::<_, Favorite>(
            "SELECT f.activation_id, a.title, a.duration_seconds, f.created_at \
             FROM favorites f \
             JOIN activations a ON a.id = f.activation_id \
             WHERE f.user_id = ? \
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(conn)
        .await
    }
}
