// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity resolution.
//!
//! Turns the raw, possibly empty, possibly failing upstream signals of a
//! platform into exactly one [`ResolvedActivity`].
//!
//! The fetch graph is fixed per platform:
//! - Spotify: refresh token → currently playing → (only if empty) recently
//!   played. Each step awaits the previous one.
//! - Steam: profile, recent list and owned list are fetched concurrently and
//!   all three settle before the decision is made.
//!
//! Source failures are downgraded to "no data" where a later fallback can
//! still produce a badge, and logged; the decision itself is a pure function
//! over the settled sources so it can be tested without a network.

use crate::config::{SpotifyCredentials, SteamCredentials};
use crate::error::{AppError, Result};
use crate::models::{GameSession, Platform, Player, ResolvedActivity, Track};
use crate::services::spotify::SpotifyClient;
use crate::services::steam::SteamClient;
use crate::services::token::TokenProvider;

/// Settle a source: failures that may degrade become `T::default()`.
fn degrade<T: Default>(platform: Platform, source: &'static str, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_degradable() => {
            tracing::warn!(
                platform = platform.as_str(),
                source,
                error = %e,
                "Upstream source failed, treating as empty"
            );
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Spotify
// ─────────────────────────────────────────────────────────────────────────────

/// Pick the Spotify variant from the two settled sources.
///
/// `recent` is only consulted when nothing is playing.
pub fn decide_track(current: Option<Track>, recent: Vec<Track>) -> ResolvedActivity {
    if let Some(track) = current {
        return ResolvedActivity::NowPlayingTrack(track);
    }
    match recent.into_iter().next() {
        Some(track) => ResolvedActivity::RecentTrack(track),
        None => ResolvedActivity::NoActivity(Platform::Spotify),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Steam
// ─────────────────────────────────────────────────────────────────────────────

/// The three settled Steam sources.
#[derive(Debug, Clone, Default)]
pub struct GameSources {
    /// `None` when the profile could not be fetched
    pub player: Option<Player>,
    pub recent: Vec<GameSession>,
    pub owned: Vec<GameSession>,
}

/// Pure decision over the Steam sources.
#[derive(Debug, Clone)]
pub struct GameDecider {
    /// Shown in preference to the most recent game when it is owned
    pub favorite_app_id: Option<u64>,
    /// Root used to synthesize header URLs for games known only by hint
    pub cdn_url: String,
}

impl GameDecider {
    /// First match wins:
    /// 1. The game the profile says is running, enriched from the recent
    ///    list, else the library, else synthesized from the hint.
    /// 2. The favorite app, if owned, with fresher recent-list data merged in.
    /// 3. The most recent game.
    /// 4. The most played owned game; ties go to the first listed.
    /// 5. Nothing.
    ///
    /// Without a profile there is nothing to attribute a game to, so the
    /// result is `NoActivity`.
    pub fn decide(&self, sources: GameSources) -> ResolvedActivity {
        let GameSources {
            player,
            recent,
            owned,
        } = sources;
        let Some(player) = player else {
            return ResolvedActivity::NoActivity(Platform::Steam);
        };

        if let Some(hint) = player.current_game.clone() {
            let game = find_game(&recent, hint.app_id)
                .or_else(|| find_game(&owned, hint.app_id))
                .cloned()
                .unwrap_or_else(|| {
                    GameSession::from_hint(&hint, format!("{}/{}/header.jpg", self.cdn_url, hint.app_id))
                });
            return ResolvedActivity::NowPlayingGame { player, game };
        }

        if let Some(favorite) = self
            .favorite_app_id
            .and_then(|id| find_game(&owned, id))
        {
            let game = match find_game(&recent, favorite.app_id) {
                Some(recent_entry) => favorite.clone().merge_recent(recent_entry),
                None => favorite.clone(),
            };
            return ResolvedActivity::RecentGame { player, game };
        }

        if let Some(game) = recent.into_iter().next() {
            return ResolvedActivity::RecentGame { player, game };
        }

        // max_by_key keeps the last of equal maxima; iterate reversed so the
        // first listed wins.
        if let Some(game) = owned
            .into_iter()
            .rev()
            .max_by_key(|game| game.playtime_minutes)
        {
            return ResolvedActivity::RecentGame { player, game };
        }

        ResolvedActivity::NoActivity(Platform::Steam)
    }
}

fn find_game(games: &[GameSession], app_id: u64) -> Option<&GameSession> {
    games.iter().find(|game| game.app_id == app_id)
}

// ─────────────────────────────────────────────────────────────────────────────
// ActivityResolver - fetch graph plus decision
// ─────────────────────────────────────────────────────────────────────────────

/// Fetches every platform source and resolves the activity.
#[derive(Clone)]
pub struct ActivityResolver {
    tokens: TokenProvider,
    spotify: SpotifyClient,
    steam: SteamClient,
    games: GameDecider,
}

impl ActivityResolver {
    pub fn new(
        tokens: TokenProvider,
        spotify: SpotifyClient,
        steam: SteamClient,
        games: GameDecider,
    ) -> Self {
        Self {
            tokens,
            spotify,
            steam,
            games,
        }
    }

    /// Resolve the Spotify activity.
    ///
    /// A rejected token exchange aborts; data endpoint failures only empty
    /// their step.
    pub async fn resolve_spotify(
        &self,
        credentials: Option<&SpotifyCredentials>,
    ) -> Result<ResolvedActivity> {
        let credentials = credentials.ok_or(AppError::ConfigMissing("spotify credentials"))?;
        let token = self.tokens.refresh(credentials).await?;

        let current = degrade(
            Platform::Spotify,
            "currently_playing",
            self.spotify.currently_playing(&token).await,
        )?;
        if let Some(track) = current {
            tracing::info!(title = %track.title, artist = %track.artist_line(), "Currently playing");
            return Ok(decide_track(Some(track), Vec::new()));
        }

        tracing::info!("No track currently playing, fetching recently played");
        let recent = degrade(
            Platform::Spotify,
            "recently_played",
            self.spotify.recently_played(&token).await,
        )?;
        Ok(decide_track(None, recent))
    }

    /// Resolve the Steam activity.
    ///
    /// The profile is required: if it fails, the failure is returned since
    /// no fallback can produce a badge without it. The lists degrade to
    /// empty.
    pub async fn resolve_steam(
        &self,
        credentials: Option<&SteamCredentials>,
    ) -> Result<ResolvedActivity> {
        let credentials = credentials.ok_or(AppError::ConfigMissing("steam credentials"))?;

        let (player, recent, owned) = tokio::join!(
            self.steam.player_summary(credentials),
            self.steam.recently_played_games(credentials),
            self.steam.owned_games(credentials),
        );

        let player = player?;
        let recent = degrade(Platform::Steam, "recently_played_games", recent)?;
        let owned = degrade(Platform::Steam, "owned_games", owned)?;
        tracing::debug!(
            recent = recent.len(),
            owned = owned.len(),
            running = ?player.current_game.as_ref().map(|g| g.app_id),
            "Steam sources settled"
        );

        Ok(self.games.decide(GameSources {
            player: Some(player),
            recent,
            owned,
        }))
    }
}
