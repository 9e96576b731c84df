// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily activity summary aggregates.
//!
//! One row per (user, UTC calendar date). Rows are created by the first
//! activity of the day and then only incremented.

use chrono::{DateTime, NaiveDate, Utc};

/// Aggregated counters for one user on one day.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct DailyActivitySummary {
    pub user_id: String,
    pub date: NaiveDate,
    pub listening_minutes: i64,
    pub activations_completed: i64,
    pub articles_read: i64,
    pub achievements_unlocked: i64,
    pub updated_at: DateTime<Utc>,
}

/// Partial set of increments. Missing fields add nothing (and start at 0
/// when the row is created).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryDelta {
    pub listening_minutes: Option<u32>,
    pub activations_completed: Option<u32>,
    pub articles_read: Option<u32>,
    pub achievements_unlocked: Option<u32>,
}

impl SummaryDelta {
    pub fn with_listening_minutes(mut self, minutes: u32) -> Self {
        self.listening_minutes = Some(minutes);
        self
    }

    pub fn with_activations_completed(mut self, count: u32) -> Self {
        self.activations_completed = Some(count);
        self
    }

    pub fn with_articles_read(mut self, count: u32) -> Self {
        self.articles_read = Some(count);
        self
    }

    pub fn with_achievements_unlocked(mut self, count: u32) -> Self {
        self.achievements_unlocked = Some(count);
        self
    }
}
