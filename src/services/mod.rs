// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod achievements;
pub mod activity;
pub mod catalog;
pub mod favorites;
pub mod password;
pub mod progress;

pub use accounts::AccountService;
pub use achievements::AchievementEvaluator;
pub use activity::ActivityAggregator;
pub use catalog::CatalogService;
pub use favorites::FavoritesService;
pub use progress::{ProgressOutcome, ProgressTracker};
