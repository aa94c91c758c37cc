// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for playtime and date formatting on badges.

use chrono::{DateTime, Utc};

const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// Format a playtime in minutes as `H:MM`, e.g. 125 → `2:05`.
pub fn format_playtime(minutes: u64) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// Describe how long ago a game was last played, relative to `now`.
///
/// Buckets: under a day "Today", under two days "Yesterday", under a week
/// "<n> days ago", otherwise a short date such as "Mar 5".
pub fn last_played_text(last_played: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(played) = last_played else {
        return "Never".to_string();
    };

    let diff = (now - played).num_seconds();
    if diff < SECS_PER_DAY {
        "Today".to_string()
    } else if diff < 2 * SECS_PER_DAY {
        "Yesterday".to_string()
    } else if diff < 7 * SECS_PER_DAY {
        format!("{} days ago", diff / SECS_PER_DAY)
    } else {
        played.format("%b %-d").to_string()
    }
}
