// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Badge routes.
//!
//! Each handler runs the whole pipeline (credentials, resolution, images,
//! rendering) and always answers 200 with an SVG. Any failure that aborts
//! the pipeline is logged and replaced by the platform's error badge.

use crate::badges::{error_badge, render, Badge, BadgeContext};
use crate::models::{Platform, ResolvedActivity};
use crate::services::{AssetCache, EncodedAsset};
use crate::AppState;
use axum::{extract::State, routing::get, Router};
use std::sync::Arc;

/// Badge routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/spotify", get(spotify_badge))
        .route("/api/steam", get(steam_badge))
}

async fn spotify_badge(State(state): State<Arc<AppState>>) -> Badge {
    build_badge(&state, Platform::Spotify).await
}

async fn steam_badge(State(state): State<Arc<AppState>>) -> Badge {
    build_badge(&state, Platform::Steam).await
}

/// Resolve, fetch images and render the badge for a platform.
pub async fn build_badge(state: &AppState, platform: Platform) -> Badge {
    let resolved = match platform {
        Platform::Spotify => {
            state
                .resolver
                .resolve_spotify(state.config.spotify.as_ref())
                .await
        }
        Platform::Steam => {
            state
                .resolver
                .resolve_steam(state.config.steam.as_ref())
                .await
        }
    };

    let activity = match resolved {
        Ok(activity) => activity,
        Err(e) => {
            tracing::error!(
                platform = platform.as_str(),
                error = %e,
                "Activity resolution failed, serving error badge"
            );
            return error_badge(platform);
        }
    };

    tracing::info!(
        platform = platform.as_str(),
        kind = activity.kind(),
        "Activity resolved"
    );

    let ctx = load_images(&state.asset_cache, &activity).await;
    render(&activity, &ctx)
}

/// Fetch the images a badge embeds. A failed image is left out.
async fn load_images(cache: &AssetCache, activity: &ResolvedActivity) -> BadgeContext {
    let (cover_url, avatar_url) = match activity {
        ResolvedActivity::NowPlayingTrack(track) | ResolvedActivity::RecentTrack(track) => {
            (track.cover_url.as_deref(), None)
        }
        ResolvedActivity::NowPlayingGame { player, game }
        | ResolvedActivity::RecentGame { player, game } => (
            Some(game.header_image_url.as_str()),
            player.avatar_url.as_deref(),
        ),
        ResolvedActivity::NoActivity(_) => (None, None),
    };

    let (cover, avatar) = tokio::join!(
        load_image(cache, cover_url, "cover"),
        load_image(cache, avatar_url, "avatar"),
    );

    BadgeContext {
        cover,
        avatar,
        now: chrono::Utc::now(),
    }
}

async fn load_image(
    cache: &AssetCache,
    url: Option<&str>,
    kind: &'static str,
) -> Option<EncodedAsset> {
    let url = url?;
    match cache.get(url).await {
        Ok(asset) => Some(asset),
        Err(e) => {
            tracing::warn!(asset = kind, url, error = %e, "Image unavailable, rendering without it");
            None
        }
    }
}
