// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Live-badges: embeddable "now playing" badges for Spotify and Steam
//!
//! This crate resolves a user's current or most recent activity from the
//! Spotify and Steam APIs and renders it as an SVG badge. Upstream failures
//! never reach the viewer; they degrade to a fallback source or to a static
//! error badge.

pub mod badges;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{ActivityResolver, AssetCache, GameDecider, SpotifyClient, SteamClient, TokenProvider};
use std::time::Duration;

/// Timeout applied to every upstream request.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub tokens: TokenProvider,
    pub resolver: ActivityResolver,
    pub asset_cache: AssetCache,
}

impl AppState {
    /// Build the services from configuration, sharing one HTTP client.
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .user_agent(concat!("live-badges/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let endpoints = &config.endpoints;
        let tokens = TokenProvider::new(http.clone(), &endpoints.spotify_accounts_url);
        let resolver = ActivityResolver::new(
            tokens.clone(),
            SpotifyClient::new(http.clone(), &endpoints.spotify_api_url),
            SteamClient::new(http.clone(), &endpoints.steam_api_url, &endpoints.steam_cdn_url),
            GameDecider {
                favorite_app_id: config.steam_favorite_app_id,
                cdn_url: endpoints.steam_cdn_url.trim_end_matches('/').to_string(),
            },
        );
        let asset_cache = AssetCache::new(http, &config.asset_cache);

        Ok(Self {
            config,
            tokens,
            resolver,
            asset_cache,
        })
    }
}
