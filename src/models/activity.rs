// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! The single activity fact a badge is rendered from.

use super::{GameSession, Player, Track};

/// Platform a badge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Spotify,
    Steam,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Spotify => "spotify",
            Platform::Steam => "steam",
        }
    }
}

/// Outcome of activity resolution. Always exactly one variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedActivity {
    NowPlayingTrack(Track),
    RecentTrack(Track),
    NowPlayingGame { player: Player, game: GameSession },
    RecentGame { player: Player, game: GameSession },
    /// Nothing current or recent to show for the platform.
    NoActivity(Platform),
}

impl ResolvedActivity {
    pub fn platform(&self) -> Platform {
        match self {
            ResolvedActivity::NowPlayingTrack(_) | ResolvedActivity::RecentTrack(_) => {
                Platform::Spotify
            }
            ResolvedActivity::NowPlayingGame { .. } | ResolvedActivity::RecentGame { .. } => {
                Platform::Steam
            }
            ResolvedActivity::NoActivity(platform) => *platform,
        }
    }

    /// Short variant name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedActivity::NowPlayingTrack(_) => "now_playing_track",
            ResolvedActivity::RecentTrack(_) => "recent_track",
            ResolvedActivity::NowPlayingGame { .. } => "now_playing_game",
            ResolvedActivity::RecentGame { .. } => "recent_game",
            ResolvedActivity::NoActivity(_) => "no_activity",
        }
    }
}
