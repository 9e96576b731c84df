// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activation catalog rows.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::models::{Activation, ActivationInput};

const COLUMNS: &str = "id, title, category_id, duration_seconds, created_at, updated_at";

pub struct ActivationRepo;

impl ActivationRepo {
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Option<Activation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activations WHERE id = ?");
        sqlx::query_as::<_, Activation>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn exists(conn: &mut SqliteConnection, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM activations WHERE id = ?)")
            .bind(id)
            .fetch_one(conn)
            .await
    }

    /// Create or replace a catalog entry. `created_at` survives replacement.
    pub async fn upsert(
        conn: &mut SqliteConnection,
        id: &str,
        input: &ActivationInput,
        now: DateTime<Utc>,
    ) -> Result<Activation, sqlx::Error> {
        let query = format!(
            "INSERT INTO activations (id, title, category_id, duration_seconds, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             ON CONFLICT (id) DO UPDATE \
             SET title = excluded.title, \
                 category_id = excluded.category_id, \
                 duration_seconds = excluded.duration_seconds, \
                 updated_at = excluded.updated_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activation>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.category_id)
            .bind(input.duration_seconds)
            .bind(now)
            .bind(now)
            .fetch_one(conn)
            .await
    }
}
