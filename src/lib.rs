// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ulepszenia: progress and achievement tracking for guided meditation
//!
//! This crate provides the backend API that records listening progress,
//! unlocks achievements, and aggregates daily activity and streaks.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::{
    AccountService, AchievementEvaluator, ActivityAggregator, CatalogService, FavoritesService,
    ProgressTracker,
};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub accounts: AccountService,
    pub catalog: CatalogService,
    pub progress: ProgressTracker,
    pub achievements: AchievementEvaluator,
    pub activity: ActivityAggregator,
    pub favorites: FavoritesService,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            accounts: AccountService::new(db.clone(), config.min_password_length),
            catalog: CatalogService::new(db.clone()),
            progress: ProgressTracker::new(db.clone()),
            achievements: AchievementEvaluator::new(db.clone()),
            activity: ActivityAggregator::new(db.clone()),
            favorites: FavoritesService::new(db.clone()),
            config,
            db,
        }
    }
}
