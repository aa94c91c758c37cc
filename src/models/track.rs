// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Spotify track model.

/// A track as shown on the badge.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Track title
    pub title: String,
    /// Artist names in credit order
    pub artists: Vec<String>,
    /// Largest album cover image, if the album has any
    pub cover_url: Option<String>,
    /// Link to the track on Spotify
    pub external_url: Option<String>,
}

impl Track {
    /// Artist credit line, e.g. "Simon & Garfunkel" or "A, B".
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}
