// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activation (audio session) model.

use chrono::{DateTime, Utc};

/// An audio session. Progress tracking only reads it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Activation {
    pub id: String,
    pub title: String,
    pub category_id: Option<String>,
    /// Fixed length of the recording
    pub duration_seconds: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin-supplied fields for creating or replacing an activation.
#[derive(Debug, Clone)]
pub struct ActivationInput {
    pub title: String,
    pub category_id: Option<String>,
    pub duration_seconds: u32,
}
