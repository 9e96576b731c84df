// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Append-only activity log with id-based paging.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::models::{ActivityLogEntry, NewActivityLogEntry};

const COLUMNS: &str = "id, user_id, action, entity_type, entity_id, metadata, created_at";

pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append one row. The log is never updated or deleted.
    pub async fn append(
        conn: &mut SqliteConnection,
        entry: &NewActivityLogEntry,
        now: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO activity_log \
                 (user_id, action, entity_type, entity_id, metadata, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.user_id)
        .bind(entry.action)
        .bind(entry.entity_type)
        .bind(&entry.entity_id)
        .bind(Json(&entry.metadata))
        .bind(now)
        .execute(conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Newest first. `before_id` continues a previous page; `user_id`
    /// restricts to one user.
    pub async fn list(
        conn: &mut SqliteConnection,
        user_id: Option<&str>,
        before_id: Option<i64>,
        limit: u32,
    ) -> Result<Vec<ActivityLogEntry>, sqlx::Error> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM activity_log WHERE 1 = 1"));

        if let Some(user_id) = user_id {
            builder.push(" AND user_id = ").push_bind(user_id);
        }
        if let Some(before_id) = before_id {
            builder.push(" AND id < ").push_bind(before_id);
        }
        builder.push(" ORDER BY id DESC LIMIT ").push_bind(limit);

        builder
            .build_query_as::<ActivityLogEntry>()
            .fetch_all(conn)
            .await
    }
}
