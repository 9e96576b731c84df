// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (SQLite via sqlx).

pub mod repositories;
pub mod sqlite;

pub use repositories::{
    AchievementRepo, ActivationRepo, ActivityLogRepo, FavoriteRepo, ProgressRepo, SummaryRepo,
    UserRepo,
};
pub use sqlite::Database;
