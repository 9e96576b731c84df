// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Table-level queries.
//!
//! Every function takes a `&mut SqliteConnection` so callers can run it on a
//! pooled connection or inside a write transaction (`&mut *tx`).

mod achievement_repo;
mod activation_repo;
mod activity_log_repo;
mod favorite_repo;
mod progress_repo;
mod summary_repo;
mod user_repo;

pub use achievement_repo::AchievementRepo;
pub use activation_repo::ActivationRepo;
pub use activity_log_repo::ActivityLogRepo;
pub use favorite_repo::FavoriteRepo;
pub use progress_repo::ProgressRepo;
pub use summary_repo::SummaryRepo;
pub use user_repo::UserRepo;

/// Saturating conversion for `COUNT(*)` results.
pub(crate) fn count_to_u32(count: i64) -> u32 {
    u32::try_from(count.max(0)).unwrap_or(u32::MAX)
}
