// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration and credential checks.

use chrono::Utc;

use crate::db::{Database, UserRepo};
use crate::error::{AppError, Result};
use crate::models::{NewUser, Role, User};
use crate::services::password;

#[derive(Clone)]
pub struct AccountService {
    db: Database,
    min_password_length: usize,
}

impl AccountService {
    pub fn new(db: Database, min_password_length: usize) -> Self {
        Self {
            db,
            min_password_length,
        }
    }

    /// Create a `user` role account. Emails are compared case-insensitively.
    pub async fn register(&self, email: &str, display_name: &str, password: &str) -> Result<User> {
        self.create(email, display_name, password, Role::User).await
    }

    /// Create an account with an explicit role (used to bootstrap admins).
    pub async fn create(
        &self,
        email: &str,
        display_name: &str,
        password: &str,
        role: Role,
    ) -> Result<User> {
        password::check_password_length(password, self.min_password_length)
            .map_err(AppError::BadRequest)?;

        let email = normalize_email(email);
        let password_hash = hash_blocking(password.to_string()).await?;

        let new_user = NewUser {
            email: email.clone(),
            display_name: display_name.trim().to_string(),
            password_hash,
            role,
        };
        let id = uuid::Uuid::new_v4().to_string();

        let mut tx = self.db.begin_write().await?;
        if UserRepo::find_by_email(&mut tx, &email).await?.is_some() {
            return Err(AppError::Conflict("email already registered".to_string()));
        }
        let user = UserRepo::insert(&mut tx, &id, &new_user, Utc::now()).await?;
        tx.commit().await?;

        tracing::info!(user_id = %user.id, role = %user.role, "Account created");
        Ok(user)
    }

    /// Check credentials. Unknown email and wrong password are indistinguishable.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);
        let user = {
            let mut conn = self.db.acquire().await?;
            UserRepo::find_by_email(&mut conn, &email).await?
        };

        let Some(user) = user else {
            tracing::debug!("Login for unknown email");
            return Err(AppError::Unauthorized);
        };

        let hash = user.password_hash.clone();
        let password = password.to_string();
        let matches = tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password check panicked: {}", e)))?
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored hash unusable: {}", e)))?;

        if !matches {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(AppError::Unauthorized);
        }
        Ok(user)
    }

    pub async fn get(&self, user_id: &str) -> Result<User> {
        let mut conn = self.db.acquire().await?;
        UserRepo::find_by_id(&mut conn, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hash on the blocking pool.
async fn hash_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing panicked: {}", e)))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}
