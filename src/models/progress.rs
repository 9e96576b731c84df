// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Listening progress models.

use chrono::{DateTime, Utc};

/// Per-(user, activation) playback state. At most one row per pair.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserProgress {
    pub user_id: String,
    pub activation_id: String,
    /// Last reported playhead position (last write wins)
    pub progress_seconds: u32,
    pub is_completed: bool,
    /// Number of completion reports, replays included
    pub listen_count: i64,
    pub last_listened_at: DateTime<Utc>,
}

/// A progress row joined with the activation it belongs to.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProgressOverview {
    pub activation_id: String,
    pub title: String,
    pub duration_seconds: u32,
    pub progress_seconds: u32,
    pub is_completed: bool,
    pub listen_count: i64,
    pub last_listened_at: DateTime<Utc>,
}

/// Largest accepted playhead position (one day). Keeps the per-report
/// minutes credited to the summary and user totals small.
pub const MAX_PROGRESS_SECONDS: u32 = 24 * 60 * 60;

/// One playback report from the player.
///
/// `is_completed` is asserted by the caller; the server does not compare
/// `progress_seconds` against the activation duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressReport {
    pub progress_seconds: u32,
    pub is_completed: bool,
}

impl ProgressReport {
    pub fn new(progress_seconds: u32, is_completed: bool) -> Self {
        Self {
            progress_seconds,
            is_completed,
        }
    }

    /// Amount added to `listen_count` by this report.
    pub fn listen_increment(&self) -> u32 {
        u32::from(self.is_completed)
    }

    /// Whole minutes credited to the daily summary and the user total.
    pub fn listening_minutes(&self) -> u32 {
        self.progress_seconds / 60
    }
}
