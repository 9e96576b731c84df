// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user favorite activations.

use chrono::Utc;

use crate::db::{ActivationRepo, ActivityLogRepo, Database, FavoriteRepo};
use crate::error::{AppError, Result};
use crate::models::{Favorite, NewActivityLogEntry};

#[derive(Clone)]
pub struct FavoritesService {
    db: Database,
}

impl FavoritesService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Flip the favorite state of an activation. Returns the new state.
    pub async fn toggle(&self, user_id: &str, activation_id: &str) -> Result<bool> {
        let now = Utc::now();
        let mut tx = self.db.begin_write().await?;

        if !ActivationRepo::exists(&mut tx, activation_id).await? {
            return Err(AppError::NotFound(format!("activation {}", activation_id)));
        }

        let removed = FavoriteRepo::delete(&mut tx, user_id, activation_id).await?;
        let is_favorite = if removed {
            false
        } else {
            FavoriteRepo::insert(&mut tx, user_id, activation_id, now).await?
        };

        let entry = NewActivityLogEntry::favorite(user_id, activation_id, is_favorite);
        ActivityLogRepo::append(&mut tx, &entry, now).await?;
        tx.commit().await?;

        tracing::debug!(user_id, activation_id, is_favorite, "Favorite toggled");
        Ok(is_favorite)
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Favorite>> {
        let mut conn = self.db.acquire().await?;
        Ok(FavoriteRepo::list_for_user(&mut conn, user_id).await?)
    }
}
