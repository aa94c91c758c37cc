// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spotify Web API client for playback state.
//!
//! Handles:
//! - "Currently playing", where an empty response means nothing is playing
//! - "Recently played", most recent first
//! - Parsing payloads into [`Track`] at the boundary; a payload of the wrong
//!   shape is an `UpstreamFailure`

use crate::error::AppError;
use crate::models::Track;
use crate::services::token::AccessToken;
use reqwest::StatusCode;
use serde::Deserialize;

/// Spotify API client.
#[derive(Clone)]
pub struct SpotifyClient {
    http: reqwest::Client,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(http: reqwest::Client, api_url: &str) -> Self {
        Self {
            http,
            base_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Track currently playing, or `None` when nothing is.
    pub async fn currently_playing(&self, token: &AccessToken) -> Result<Option<Track>, AppError> {
        let url = format!("{}/me/player/currently-playing", self.base_url);
        let response = self.get(&url, token).await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::UpstreamFailure(format!("Failed to read body: {}", e)))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let playback: CurrentlyPlaying = serde_json::from_slice(&body)
            .map_err(|e| AppError::UpstreamFailure(format!("JSON parse error: {}", e)))?;
        Ok(playback.item.map(Track::from))
    }

    /// Recently played tracks, most recent first (single page).
    pub async fn recently_played(&self, token: &AccessToken) -> Result<Vec<Track>, AppError> {
        let url = format!("{}/me/player/recently-played", self.base_url);
        let response = self.get(&url, token).await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        let history: RecentlyPlayed = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamFailure(format!("JSON parse error: {}", e)))?;
        Ok(history
            .items
            .into_iter()
            .map(|played| Track::from(played.track))
            .collect())
    }

    /// Authorized GET; non-success statuses become `UpstreamFailure`.
    async fn get(&self, url: &str, token: &AccessToken) -> Result<reqwest::Response, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| AppError::UpstreamFailure(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::TOO_MANY_REQUESTS {
                tracing::warn!("Spotify rate limit hit (429)");
            }
            return Err(AppError::UpstreamFailure(format!("HTTP {}: {}", status, body)));
        }

        Ok(response)
    }
}

/// "Currently playing" response. `item` is null for ads and unknown media.
#[derive(Debug, Deserialize)]
struct CurrentlyPlaying {
    item: Option<SpotifyTrack>,
}

/// "Recently played" response page.
#[derive(Debug, Deserialize)]
struct RecentlyPlayed {
    #[serde(default)]
    items: Vec<PlayHistory>,
}

#[derive(Debug, Deserialize)]
struct PlayHistory {
    track: SpotifyTrack,
}

#[derive(Debug, Deserialize)]
struct SpotifyTrack {
    name: String,
    artists: Vec<SpotifyArtist>,
    album: SpotifyAlbum,
    #[serde(default)]
    external_urls: ExternalUrls,
}

#[derive(Debug, Deserialize)]
struct SpotifyArtist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SpotifyAlbum {
    #[serde(default)]
    images: Vec<SpotifyImage>,
}

#[derive(Debug, Deserialize)]
struct SpotifyImage {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

impl From<SpotifyTrack> for Track {
    fn from(track: SpotifyTrack) -> Self {
        Track {
            title: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            // Spotify lists album images widest first.
            cover_url: track.album.images.into_iter().next().map(|i| i.url),
            external_url: track.external_urls.spotify,
        }
    }
}
