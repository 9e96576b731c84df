// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin maintenance of the activation and achievement catalogs.

use chrono::Utc;

use crate::db::{AchievementRepo, ActivationRepo, Database};
use crate::error::Result;
use crate::models::{Achievement, AchievementInput, Activation, ActivationInput};

#[derive(Clone)]
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn upsert_activation(&self, id: &str, input: &ActivationInput) -> Result<Activation> {
        let mut tx = self.db.begin_write().await?;
        let activation = ActivationRepo::upsert(&mut tx, id, input, Utc::now()).await?;
        tx.commit().await?;

        tracing::info!(
            activation_id = id,
            duration_seconds = input.duration_seconds,
            "Activation saved"
        );
        Ok(activation)
    }

    /// Changing a milestone never revokes unlocks already granted.
    pub async fn upsert_achievement(
        &self,
        id: &str,
        input: &AchievementInput,
    ) -> Result<Achievement> {
        let mut tx = self.db.begin_write().await?;
        let achievement = AchievementRepo::upsert(&mut tx, id, input, Utc::now()).await?;
        tx.commit().await?;

        tracing::info!(
            achievement_id = id,
            achievement_type = ?input.achievement_type,
            milestone = input.milestone,
            "Achievement saved"
        );
        Ok(achievement)
    }
}
