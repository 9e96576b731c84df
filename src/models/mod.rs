// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod achievement;
pub mod activation;
pub mod activity_log;
pub mod favorite;
pub mod progress;
pub mod summary;
pub mod user;

pub use achievement::{
    newly_qualified, Achievement, AchievementInput, AchievementStatus, AchievementType,
};
pub use activation::{Activation, ActivationInput};
pub use activity_log::{ActivityAction, ActivityLogEntry, EntityType, NewActivityLogEntry};
pub use favorite::Favorite;
pub use progress::{ProgressOverview, ProgressReport, UserProgress, MAX_PROGRESS_SECONDS};
pub use summary::{DailyActivitySummary, SummaryDelta};
pub use user::{NewUser, Role, User};
