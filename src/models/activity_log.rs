// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Append-only activity log records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::types::Json;

/// Kind of event recorded in the activity log.
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ActivityAction {
    ActivationCompleted,
    ActivationProgress,
    AchievementUnlocked,
    ArticleRead,
    FavoriteAdded,
    FavoriteRemoved,
}

/// What the `entity_id` of a log row refers to.
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum EntityType {
    Activation,
    Achievement,
    Article,
}

/// Stored log row. `id` increases with insertion order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityLogEntry {
    pub id: i64,
    pub user_id: String,
    pub action: ActivityAction,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub metadata: Json<Value>,
    pub created_at: DateTime<Utc>,
}

/// Log row before insertion.
#[derive(Debug, Clone)]
pub struct NewActivityLogEntry {
    pub user_id: String,
    pub action: ActivityAction,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub metadata: Value,
}

impl NewActivityLogEntry {
    pub fn activation_completed(user_id: &str, activation_id: &str, progress_seconds: u32) -> Self {
        Self {
            user_id: user_id.to_string(),
            action: ActivityAction::ActivationCompleted,
            entity_type: Some(EntityType::Activation),
            entity_id: Some(activation_id.to_string()),
            metadata: json!({ "progressSeconds": progress_seconds }),
        }
    }

    pub fn activation_progress(user_id: &str, activation_id: &str, progress_seconds: u32) -> Self {
        Self {
            action: ActivityAction::ActivationProgress,
            ..Self::activation_completed(user_id, activation_id, progress_seconds)
        }
    }

    pub fn achievement_unlocked(user_id: &str, achievement_id: &str, name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            action: ActivityAction::AchievementUnlocked,
            entity_type: Some(EntityType::Achievement),
            entity_id: Some(achievement_id.to_string()),
            metadata: json!({ "achievementName": name }),
        }
    }

    pub fn article_read(user_id: &str, article_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            action: ActivityAction::ArticleRead,
            entity_type: Some(EntityType::Article),
            entity_id: Some(article_id.to_string()),
            metadata: json!({}),
        }
    }

    pub fn favorite(user_id: &str, activation_id: &str, added: bool) -> Self {
        Self {
            user_id: user_id.to_string(),
            action: if added {
                ActivityAction::FavoriteAdded
            } else {
                ActivityAction::FavoriteRemoved
            },
            entity_type: Some(EntityType::Activation),
            entity_id: Some(activation_id.to_string()),
            metadata: json!({}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_entry_shares_completed_shape() {
        let entry = NewActivityLogEntry::activation_progress("u1", "a1", 42);
        assert_eq!(entry.action, ActivityAction::ActivationProgress);
        assert_eq!(entry.entity_type, Some(EntityType::Activation));
        assert_eq!(entry.entity_id.as_deref(), Some("a1"));
        assert_eq!(entry.metadata["progressSeconds"], 42);
    }

    #[test]
    fn test_action_serializes_snake_case() {
        let value = serde_json::to_value(ActivityAction::AchievementUnlocked).unwrap();
        assert_eq!(value, "achievement_unlocked");
    }
}
