// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Badge rendering.
//!
//! [`render`] is a total function from a resolved activity to SVG markup.
//! It performs no I/O: images arrive already encoded in the
//! [`BadgeContext`], and a missing image renders as an empty region.
//! Every layout is one of the fixed [`Template`]s below.

mod spotify;
mod steam;

use crate::models::{Platform, ResolvedActivity};
use crate::services::assets::EncodedAsset;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};

/// Rendered SVG markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge(String);

impl Badge {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Badges are always served as a 200 image with a one-second shared cache,
/// whether they show activity or an error.
impl IntoResponse for Badge {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static("image/svg+xml")),
                (header::CACHE_CONTROL, HeaderValue::from_static("s-maxage=1")),
            ],
            self.0,
        )
            .into_response()
    }
}

/// Inputs to rendering besides the activity itself.
#[derive(Debug, Clone)]
pub struct BadgeContext {
    /// Album cover or game header image
    pub cover: Option<EncodedAsset>,
    /// Profile avatar (game badges only)
    pub avatar: Option<EncodedAsset>,
    /// Reference time for "last played" text
    pub now: DateTime<Utc>,
}

impl BadgeContext {
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            cover: None,
            avatar: None,
            now,
        }
    }
}

/// Fixed canvas of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub width: u32,
    pub height: u32,
    /// Accessible title of the image
    pub title: &'static str,
}

pub const NOW_PLAYING_TRACK: Template = Template {
    width: 320,
    height: 470,
    title: "Now playing on Spotify",
};
pub const RECENT_TRACK: Template = Template {
    width: 320,
    height: 470,
    title: "Recently played on Spotify",
};
pub const NOW_PLAYING_GAME: Template = Template {
    width: 320,
    height: 150,
    title: "Now playing on Steam",
};
pub const RECENT_GAME: Template = Template {
    width: 320,
    height: 150,
    title: "Recently played on Steam",
};
pub const SPOTIFY_ERROR: Template = Template {
    width: 320,
    height: 125,
    title: "Spotify Error",
};
pub const STEAM_ERROR: Template = Template {
    width: 320,
    height: 150,
    title: "Steam Error",
};

/// Layout for an activity.
pub fn template_for(activity: &ResolvedActivity) -> Template {
    match activity {
        ResolvedActivity::NowPlayingTrack(_) => NOW_PLAYING_TRACK,
        ResolvedActivity::RecentTrack(_) => RECENT_TRACK,
        ResolvedActivity::NowPlayingGame { .. } => NOW_PLAYING_GAME,
        ResolvedActivity::RecentGame { .. } => RECENT_GAME,
        ResolvedActivity::NoActivity(Platform::Spotify) => SPOTIFY_ERROR,
        ResolvedActivity::NoActivity(Platform::Steam) => STEAM_ERROR,
    }
}

/// Render an activity. Never fails; `NoActivity` renders the error badge.
pub fn render(activity: &ResolvedActivity, ctx: &BadgeContext) -> Badge {
    let template = template_for(activity);
    let body = match activity {
        ResolvedActivity::NowPlayingTrack(track) => spotify::track_body(track, ctx, true),
        ResolvedActivity::RecentTrack(track) => spotify::track_body(track, ctx, false),
        ResolvedActivity::NowPlayingGame { player, game } => {
            steam::game_body(player, game, ctx, true)
        }
        ResolvedActivity::RecentGame { player, game } => {
            steam::game_body(player, game, ctx, false)
        }
        ResolvedActivity::NoActivity(platform) => return error_badge(*platform),
    };
    Badge(frame(template, &body))
}

/// Static fallback badge for a platform.
pub fn error_badge(platform: Platform) -> Badge {
    match platform {
        Platform::Spotify => Badge(frame(SPOTIFY_ERROR, spotify::ERROR_BODY)),
        Platform::Steam => Badge(frame(STEAM_ERROR, &steam::error_body())),
    }
}

/// Escape user-supplied text for embedding. Only `&` is rewritten.
pub fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
}

/// Escape text for an attribute value or element content. Used for the
/// Steam persona name, which the player controls.
pub fn escape_attribute(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap an XHTML body in the SVG canvas of a template.
fn frame(template: Template, body: &str) -> String {
    let Template {
        width,
        height,
        title,
    } = template;
    format!(
        r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" aria-labelledby="cardTitle" role="img">
  <title id="cardTitle">{title}</title>
  <foreignObject width="{width}" height="{height}">
    <div xmlns="http://www.w3.org/1999/xhtml" class="container">
{body}
    </div>
  </foreignObject>
</svg>
"#
    )
}

/// Font stack shared by every layout.
const FONT_CSS: &str = "div { font-family: -apple-system, BlinkMacSystemFont, Segoe UI, Helvetica, Arial, sans-serif, Apple Color Emoji, Segoe UI Emoji; }";
