// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User accounts and their listening totals.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::models::{NewUser, User};

const COLUMNS: &str = "id, email, display_name, password_hash, role, \
                       total_listening_minutes, last_active_at, created_at";

pub struct UserRepo;

impl UserRepo {
    pub async fn insert(
        conn: &mut SqliteConnection,
        id: &str,
        user: &NewUser,
        now: DateTime<Utc>,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, email, display_name, password_hash, role, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&user.email)
            .bind(&user.display_name)
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(now)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Lookup by email. Emails are stored lowercased.
    pub async fn find_by_email(
        conn: &mut SqliteConnection,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(conn)
            .await
    }

    pub async fn exists(conn: &mut SqliteConnection, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id)
            .fetch_one(conn)
            .await
    }

    /// Credit listening minutes from a completion and mark the user active.
    pub async fn record_listening(
        conn: &mut SqliteConnection,
        id: &str,
        minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users \
             SET total_listening_minutes = total_listening_minutes + ?, last_active_at = ? \
             WHERE id = ?",
        )
        .bind(minutes)
        .bind(now)
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }
}
