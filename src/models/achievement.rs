// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Achievement catalog and unlock records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What an achievement's milestone counts.
///
/// Only `ActivationCount` has an evaluation path. `StreakDays` and
/// `TotalMinutes` entries can exist in the catalog but are never unlocked
/// automatically.
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum AchievementType {
    ActivationCount,
    StreakDays,
    TotalMinutes,
}

/// Static catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub achievement_type: AchievementType,
    /// Threshold; met when the counted value is >= milestone
    pub milestone: u32,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Achievement {
    /// Whether `completed` finished activations satisfy this entry.
    pub fn is_met_by_completed_count(&self, completed: u32) -> bool {
        self.achievement_type == AchievementType::ActivationCount && completed >= self.milestone
    }
}

/// Admin-supplied fields for creating or replacing a catalog entry.
#[derive(Debug, Clone)]
pub struct AchievementInput {
    pub name: String,
    pub description: String,
    pub achievement_type: AchievementType,
    pub milestone: u32,
    pub icon: Option<String>,
}

/// Catalog entry with the viewing user's unlock time, if any.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AchievementStatus {
    #[sqlx(flatten)]
    pub achievement: Achievement,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Catalog entries that `completed` satisfies and that are not yet unlocked.
///
/// No ordering is promised between several entries qualifying at once.
pub fn newly_qualified<'a>(
    catalog: &'a [Achievement],
    completed: u32,
    unlocked: &HashSet<String>,
) -> Vec<&'a Achievement> {
    catalog
        .iter()
        .filter(|a| a.is_met_by_completed_count(completed))
        .filter(|a| !unlocked.contains(&a.id))
        .collect()
}
