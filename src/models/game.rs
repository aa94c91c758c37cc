// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Steam profile and game session models.

use chrono::{DateTime, Utc};

/// Steam user profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Persona name
    pub display_name: Option<String>,
    /// Medium avatar, falling back to the small one
    pub avatar_url: Option<String>,
    /// Game the profile reports as running right now
    pub current_game: Option<CurrentGame>,
}

impl Player {
    pub const DEFAULT_DISPLAY_NAME: &'static str = "Steam User";

    /// Name shown on the badge.
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or(Self::DEFAULT_DISPLAY_NAME)
    }
}

/// "Currently playing" hint from the profile.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentGame {
    pub app_id: u64,
    pub name: String,
}

/// One game as reported by the recent-activity or owned-library list.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub app_id: u64,
    pub name: String,
    /// Lifetime playtime in minutes
    pub playtime_minutes: u64,
    /// Playtime over the last two weeks (recent list only)
    pub playtime_two_weeks_minutes: Option<u64>,
    pub last_played: Option<DateTime<Utc>>,
    pub header_image_url: String,
}

impl GameSession {
    /// Minimal record built from the profile hint alone.
    pub fn from_hint(hint: &CurrentGame, header_image_url: String) -> Self {
        Self {
            app_id: hint.app_id,
            name: hint.name.clone(),
            playtime_minutes: 0,
            playtime_two_weeks_minutes: None,
            last_played: None,
            header_image_url,
        }
    }

    /// Overlay the fresher fields of a recent-list entry for the same app.
    ///
    /// The recent list carries no last-played time, so the library's value
    /// is kept unless the recent entry has one.
    pub fn merge_recent(mut self, recent: &GameSession) -> Self {
        self.name = recent.name.clone();
        self.playtime_minutes = recent.playtime_minutes;
        self.playtime_two_weeks_minutes = recent.playtime_two_weeks_minutes;
        self.last_played = recent.last_played.or(self.last_played);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(app_id: u64, playtime: u64) -> GameSession {
        GameSession {
            app_id,
            name: format!("Game {}", app_id),
            playtime_minutes: playtime,
            playtime_two_weeks_minutes: None,
            last_played: None,
            header_image_url: format!("https://cdn/{}/header.jpg", app_id),
        }
    }

    #[test]
    fn test_merge_recent_keeps_library_last_played() {
        let played = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let owned = GameSession {
            last_played: Some(played),
            ..session(271590, 100)
        };
        let recent = GameSession {
            playtime_two_weeks_minutes: Some(30),
            name: "Grand Theft Auto V Legacy".to_string(),
            ..session(271590, 130)
        };

        let merged = owned.merge_recent(&recent);

        assert_eq!(merged.name, "Grand Theft Auto V Legacy");
        assert_eq!(merged.playtime_minutes, 130);
        assert_eq!(merged.playtime_two_weeks_minutes, Some(30));
        assert_eq!(merged.last_played, Some(played));
    }

    #[test]
    fn test_from_hint_has_zero_playtime() {
        let hint = CurrentGame {
            app_id: 730,
            name: "Counter-Strike 2".to_string(),
        };
        let game = GameSession::from_hint(&hint, "https://cdn/730/header.jpg".to_string());
        assert_eq!(game.playtime_minutes, 0);
        assert_eq!(game.name, "Counter-Strike 2");
        assert!(game.last_played.is_none());
    }

    #[test]
    fn test_default_display_name() {
        let player = Player {
            display_name: None,
            avatar_url: None,
            current_game: None,
        };
        assert_eq!(player.display_name(), "Steam User");
    }
}
