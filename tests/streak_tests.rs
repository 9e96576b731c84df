// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Streak figure: distinct UTC days among the most recent progress rows.

use chrono::{DateTime, Duration, TimeZone, Utc};
use ulepszenia_api::db::{Database, ProgressRepo};
use ulepszenia_api::models::{ProgressReport, Role};
use ulepszenia_api::services::activity::STREAK_WINDOW;
use ulepszenia_api::services::ActivityAggregator;

mod common;

async fn listen_at(db: &Database, activation_id: &str, at: DateTime<Utc>) {
    let mut conn = db.acquire().await.unwrap();
    ProgressRepo::upsert(
        &mut conn,
        "u1",
        activation_id,
        &ProgressReport::new(60, false),
        at,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_streak_counts_distinct_days_not_consecutive() {
    let db = common::test_db().await;
    common::seed_user(&db, "u1", Role::User).await;
    for id in ["a1", "a2", "a3"] {
        common::seed_activation(&db, id, 300).await;
    }

    listen_at(&db, "a1", Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()).await;
    listen_at(&db, "a2", Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap()).await;
    listen_at(&db, "a3", Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap()).await;

    let activity = ActivityAggregator::new(db);
    assert_eq!(activity.streak_days("u1").await.unwrap(), 2);
}

#[tokio::test]
async fn test_streak_without_history_is_zero() {
    let db = common::test_db().await;
    common::seed_user(&db, "u1", Role::User).await;

    let activity = ActivityAggregator::new(db);
    assert_eq!(activity.streak_days("u1").await.unwrap(), 0);
}

#[tokio::test]
async fn test_streak_only_sees_most_recent_rows() {
    let db = common::test_db().await;
    common::seed_user(&db, "u1", Role::User).await;

    // 10 old rows on 10 separate days, then 30 newer rows on only 3 days.
    // Only the newest 30 count, so the old days must not show up.
    let old_start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    for i in 0..10 {
        let id = format!("old{i}");
        common::seed_activation(&db, &id, 300).await;
        listen_at(&db, &id, old_start + Duration::days(i)).await;
    }
    let recent_start = Utc.with_ymd_and_hms(2024, 4, 1, 6, 0, 0).unwrap();
    for i in 0..30 {
        let id = format!("new{i}");
        common::seed_activation(&db, &id, 300).await;
        let at = recent_start + Duration::days(i / 10) + Duration::minutes(i % 10);
        listen_at(&db, &id, at).await;
    }

    let activity = ActivityAggregator::new(db);
    assert_eq!(STREAK_WINDOW, 30);
    assert_eq!(activity.streak_days("u1").await.unwrap(), 3);
}

#[tokio::test]
async fn test_same_day_replays_count_once() {
    let db = common::test_db().await;
    common::seed_user(&db, "u1", Role::User).await;
    let day = Utc.with_ymd_and_hms(2024, 5, 5, 6, 0, 0).unwrap();
    for i in 0..5 {
        let id = format!("a{i}");
        common::seed_activation(&db, &id, 300).await;
        listen_at(&db, &id, day + Duration::hours(i)).await;
    }

    let activity = ActivityAggregator::new(db);
    assert_eq!(activity.streak_days("u1").await.unwrap(), 1);
}
