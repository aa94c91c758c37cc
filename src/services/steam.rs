// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Steam Web API client.
//!
//! Three independent endpoints feed the game badge: the player summary,
//! the recently played list and the owned library. Every response is a
//! `{"response": ...}` envelope that is unwrapped and converted into the
//! crate's models here.

use crate::config::SteamCredentials;
use crate::error::AppError;
use crate::models::{CurrentGame, GameSession, Player};
use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// How many entries of the recently played list to request.
const RECENT_GAMES_COUNT: u32 = 10;

/// Steam API client.
#[derive(Clone)]
pub struct SteamClient {
    http: reqwest::Client,
    base_url: String,
    cdn_url: String,
}

impl SteamClient {
    pub fn new(http: reqwest::Client, api_url: &str, cdn_url: &str) -> Self {
        Self {
            http,
            base_url: api_url.trim_end_matches('/').to_string(),
            cdn_url: cdn_url.trim_end_matches('/').to_string(),
        }
    }

    /// Header artwork URL for an app.
    pub fn header_image_url(&self, app_id: u64) -> String {
        format!("{}/{}/header.jpg", self.cdn_url, app_id)
    }

    /// Player profile. An empty player list is a failure: the profile is
    /// the one source the badge cannot do without.
    pub async fn player_summary(&self, creds: &SteamCredentials) -> Result<Player, AppError> {
        let url = format!("{}/ISteamUser/GetPlayerSummaries/v2/", self.base_url);
        let steam_id = creds.user_id.to_string();
        let envelope: Envelope<PlayerList> = self
            .get_json(&url, &[("key", creds.api_key.as_str()), ("steamids", steam_id.as_str())])
            .await?;

        envelope
            .response
            .players
            .into_iter()
            .next()
            .map(Player::from)
            .ok_or_else(|| AppError::UpstreamFailure("No player data in response".to_string()))
    }

    /// Recently played games, most recent first.
    pub async fn recently_played_games(
        &self,
        creds: &SteamCredentials,
    ) -> Result<Vec<GameSession>, AppError> {
        let url = format!("{}/IPlayerService/GetRecentlyPlayedGames/v1/", self.base_url);
        let steam_id = creds.user_id.to_string();
        let count = RECENT_GAMES_COUNT.to_string();
        let envelope: Envelope<GameList> = self
            .get_json(
                &url,
                &[
                    ("key", creds.api_key.as_str()),
                    ("steamid", steam_id.as_str()),
                    ("count", count.as_str()),
                ],
            )
            .await?;

        Ok(self.sessions(envelope.response.games))
    }

    /// Every game in the library, free games included.
    pub async fn owned_games(&self, creds: &SteamCredentials) -> Result<Vec<GameSession>, AppError> {
        let url = format!("{}/IPlayerService/GetOwnedGames/v1/", self.base_url);
        let steam_id = creds.user_id.to_string();
        let envelope: Envelope<GameList> = self
            .get_json(
                &url,
                &[
                    ("key", creds.api_key.as_str()),
                    ("steamid", steam_id.as_str()),
                    ("include_appinfo", "true"),
                    ("include_played_free_games", "true"),
                ],
            )
            .await?;

        Ok(self.sessions(envelope.response.games))
    }

    fn sessions(&self, games: Vec<SteamGame>) -> Vec<GameSession> {
        games
            .into_iter()
            .map(|game| GameSession {
                header_image_url: self.header_image_url(game.appid),
                app_id: game.appid,
                name: game.name,
                playtime_minutes: game.playtime_forever,
                playtime_two_weeks_minutes: game.playtime_2weeks,
                last_played: game
                    .rtime_last_played
                    .filter(|&t| t > 0)
                    .and_then(|t| DateTime::from_timestamp(t, 0)),
            })
            .collect()
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            // Error text would otherwise carry the query string, API key included.
            .map_err(|e| AppError::UpstreamFailure(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::UpstreamFailure(format!("HTTP {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamFailure(format!("JSON parse error: {}", e.without_url())))
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Debug, Deserialize)]
struct PlayerList {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
struct PlayerSummary {
    personaname: Option<String>,
    avatar: Option<String>,
    avatarmedium: Option<String>,
    /// App id of the running game, sent as a string
    gameid: Option<String>,
    /// Name of the running game
    gameextrainfo: Option<String>,
}

impl From<PlayerSummary> for Player {
    fn from(summary: PlayerSummary) -> Self {
        let current_game = match (summary.gameid, summary.gameextrainfo) {
            (Some(id), Some(name)) if !name.is_empty() => id
                .parse()
                .ok()
                .map(|app_id| CurrentGame { app_id, name }),
            _ => None,
        };

        Player {
            display_name: summary.personaname.filter(|n| !n.is_empty()),
            avatar_url: summary
                .avatarmedium
                .or(summary.avatar)
                .filter(|u| !u.is_empty()),
            current_game,
        }
    }
}

/// The `games` array is omitted entirely when the list is empty.
#[derive(Debug, Deserialize)]
struct GameList {
    #[serde(default)]
    games: Vec<SteamGame>,
}

#[derive(Debug, Deserialize)]
struct SteamGame {
    appid: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    playtime_forever: u64,
    playtime_2weeks: Option<u64>,
    rtime_last_played: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SteamClient {
        SteamClient::new(
            reqwest::Client::new(),
            "https://api.steampowered.com",
            "https://cdn.cloudflare.steamstatic.com/steam/apps/",
        )
    }

    #[test]
    fn test_header_image_url() {
        assert_eq!(
            client().header_image_url(271590),
            "https://cdn.cloudflare.steamstatic.com/steam/apps/271590/header.jpg"
        );
    }

    #[test]
    fn test_player_with_running_game() {
        let json = r#"{"response": {"players": [{
            "steamid": "76561198000000000",
            "personaname": "gordon",
            "avatar": "https://avatars/small.jpg",
            "avatarmedium": "https://avatars/medium.jpg",
            "gameid": "220",
            "gameextrainfo": "Half-Life 2"
        }]}}"#;
        let envelope: Envelope<PlayerList> = serde_json::from_str(json).unwrap();
        let player = Player::from(envelope.response.players.into_iter().next().unwrap());

        assert_eq!(player.display_name(), "gordon");
        assert_eq!(player.avatar_url.as_deref(), Some("https://avatars/medium.jpg"));
        assert_eq!(
            player.current_game,
            Some(CurrentGame {
                app_id: 220,
                name: "Half-Life 2".to_string()
            })
        );
    }

    #[test]
    fn test_player_hint_needs_id_and_name() {
        let summary = PlayerSummary {
            personaname: None,
            avatar: Some("https://avatars/small.jpg".to_string()),
            avatarmedium: None,
            gameid: Some("220".to_string()),
            gameextrainfo: None,
        };
        let player = Player::from(summary);
        assert!(player.current_game.is_none());
        assert_eq!(player.avatar_url.as_deref(), Some("https://avatars/small.jpg"));
    }

    #[test]
    fn test_empty_game_list() {
        let envelope: Envelope<GameList> =
            serde_json::from_str(r#"{"response": {"total_count": 0}}"#).unwrap();
        assert!(envelope.response.games.is_empty());
    }

    #[test]
    fn test_game_shape_mismatch_is_rejected() {
        let json = r#"{"response": {"games": [{"appid": "not-a-number"}]}}"#;
        assert!(serde_json::from_str::<Envelope<GameList>>(json).is_err());
    }

    #[test]
    fn test_sessions_drop_zero_timestamps() {
        let games = vec![
            SteamGame {
                appid: 10,
                name: "Counter-Strike".to_string(),
                playtime_forever: 42,
                playtime_2weeks: None,
                rtime_last_played: Some(0),
            },
            SteamGame {
                appid: 20,
                name: "Team Fortress Classic".to_string(),
                playtime_forever: 7,
                playtime_2weeks: Some(7),
                rtime_last_played: Some(1_700_000_000),
            },
        ];
        let sessions = client().sessions(games);

        assert_eq!(sessions[0].last_played, None);
        assert_eq!(
            sessions[1].last_played,
            DateTime::from_timestamp(1_700_000_000, 0)
        );
        assert_eq!(
            sessions[1].header_image_url,
            "https://cdn.cloudflare.steamstatic.com/steam/apps/20/header.jpg"
        );
    }
}
