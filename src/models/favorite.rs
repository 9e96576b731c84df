// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, Utc};

/// A user's bookmarked activation, joined with its title.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Favorite {
    pub activation_id: String,
    pub title: String,
    pub duration_seconds: u32,
    pub created_at: DateTime<Utc>,
}
