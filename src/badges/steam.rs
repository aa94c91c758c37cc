// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Steam game layouts.

use super::{escape_attribute, escape_markup, BadgeContext, FONT_CSS};
use crate::models::{GameSession, Player};
use crate::time_utils::{format_playtime, last_played_text};

const STEAM_LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 233 233" fill="#ffffff"><path d="M104.515 105.037L147.175 98.6195C149.817 98.1007 152.515 99.6639 153.033 102.306C153.552 104.948 151.989 107.646 149.347 108.165L106.687 114.582C104.045 115.101 101.347 113.538 100.828 110.896C100.31 108.254 101.873 105.556 104.515 105.037Z" fill="#ffffff"/><path d="M181.286 71.4286C181.286 88.5338 167.391 102.429 150.286 102.429C133.181 102.429 119.286 88.5338 119.286 71.4286C119.286 54.3234 133.181 40.4286 150.286 40.4286C167.391 40.4286 181.286 54.3234 181.286 71.4286Z" stroke="#ffffff" stroke-width="12"/><path d="M113.714 161.429C113.714 178.534 99.8195 192.429 82.7143 192.429C65.6091 192.429 51.7143 178.534 51.7143 161.429C51.7143 144.323 65.6091 130.429 82.7143 130.429C99.8195 130.429 113.714 144.323 113.714 161.429Z" stroke="#ffffff" stroke-width="12"/><path d="M116.5 0.5C179.513 0.5 231 52.4868 231 116C231 179.513 179.513 231.5 116.5 231.5C53.4868 231.5 2 179.513 2 116C2 52.4868 53.4868 0.5 116.5 0.5Z" stroke="#ffffff" stroke-width="3"/><path d="M174.657 56.1786C185.96 56.1786 195.157 65.3755 195.157 76.6786C195.157 87.9816 185.96 97.1786 174.657 97.1786C163.354 97.1786 154.157 87.9816 154.157 76.6786C154.157 65.3755 163.354 56.1786 174.657 56.1786Z" fill="#ffffff"/><path d="M82.7143 146.429C90.4524 146.429 96.7143 152.691 96.7143 160.429C96.7143 168.167 90.4524 174.429 82.7143 174.429C74.9762 174.429 68.7143 168.167 68.7143 160.429C68.7143 152.691 74.9762 146.429 82.7143 146.429Z" fill="#ffffff"/></svg>"##;

const CLOCK_ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="#acdbf5" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"></circle><polyline points="12 6 12 12 16 14"></polyline></svg>"##;

const GAME_CSS: &str = r#"
.container { position: relative; overflow: hidden; height: 150px; border-radius: 8px; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.2); border: 1px solid rgba(255, 255, 255, 0.1); background-color: #1b2838; }
.background-image { position: absolute; top: 0; left: 0; width: 100%; height: 100%; background-size: cover; background-position: center; z-index: 1; }
.vignette { position: absolute; top: 0; left: 0; width: 100%; height: 100%; background: radial-gradient(circle, transparent 50%, rgba(0, 0, 0, 0.3) 100%); z-index: 2; }
.header { position: absolute; top: 0; left: 0; width: 100%; padding: 10px 15px; box-sizing: border-box; z-index: 4; display: flex; justify-content: space-between; align-items: center; }
.status-indicator { display: flex; align-items: center; background-color: rgba(0, 0, 0, 0.5); padding: 5px 10px; border-radius: 20px; box-shadow: 0 2px 4px rgba(0, 0, 0, 0.3); }
.status-dot { width: 8px; height: 8px; border-radius: 50%; margin-right: 6px; }
.status-dot.live { background-color: #1db954; animation: pulse 1.5s infinite; }
.status-dot.idle { background-color: #8f98a0; }
@keyframes pulse { 0% { transform: scale(0.95); opacity: 0.8; } 50% { transform: scale(1.1); opacity: 1; } 100% { transform: scale(0.95); opacity: 0.8; } }
.status-text, .username { color: #ffffff; font-size: 12px; font-weight: 500; text-shadow: 0 1px 2px rgba(0, 0, 0, 0.5); }
.user-info { display: flex; align-items: center; background-color: rgba(0, 0, 0, 0.5); padding: 4px; padding-right: 10px; border-radius: 20px; box-shadow: 0 2px 4px rgba(0, 0, 0, 0.3); }
.user-avatar { width: 24px; height: 24px; border-radius: 50%; margin-right: 6px; border: 1px solid rgba(255, 255, 255, 0.3); }
.steam-logo-small { margin-right: 6px; }
.footer { position: absolute; bottom: 0; left: 0; width: 100%; background: linear-gradient(to top, rgba(23, 35, 46, 0.95), rgba(27, 40, 56, 0.8)); padding: 15px; box-sizing: border-box; z-index: 3; display: flex; justify-content: space-between; align-items: center; box-shadow: 0 -2px 10px rgba(0, 0, 0, 0.3); }
.game-info { display: flex; flex-direction: column; }
.game-name { color: #ffffff; font-size: 16px; font-weight: bold; margin-bottom: 4px; text-shadow: 0 1px 2px rgba(0, 0, 0, 0.5); }
.last-played { color: #8f98a0; font-size: 13px; text-shadow: 0 1px 1px rgba(0, 0, 0, 0.5); }
.playtime { display: flex; align-items: center; color: #ffffff; font-size: 14px; background-color: rgba(0, 0, 0, 0.3); padding: 6px 10px; border-radius: 4px; text-shadow: 0 1px 1px rgba(0, 0, 0, 0.5); }
.clock-icon { margin-right: 6px; filter: drop-shadow(0 1px 1px rgba(0, 0, 0, 0.5)); }
"#;

const ERROR_CSS: &str = r#"
.container { background: linear-gradient(to bottom, #1b2838, #171e26); padding: 15px; display: flex; flex-direction: column; justify-content: center; align-items: center; height: 100%; box-sizing: border-box; border-radius: 8px; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.2); border: 1px solid rgba(255, 255, 255, 0.1); }
.steam-logo { margin-bottom: 15px; opacity: 0.7; }
.error-message { color: #ff1616; font-weight: bold; text-align: center; text-shadow: 0 1px 2px rgba(0, 0, 0, 0.5); }
"#;

pub(super) fn error_body() -> String {
    format!(
        r#"<style>
{FONT_CSS}{ERROR_CSS}</style>
<div class="steam-logo">{STEAM_LOGO_SVG}</div>
<div class="error-message">Error connecting to Steam</div>"#
    )
}

/// Body of both game layouts.
pub(super) fn game_body(
    player: &Player,
    game: &GameSession,
    ctx: &BadgeContext,
    now_playing: bool,
) -> String {
    let (dot_class, status, detail) = if now_playing {
        ("live", "Playing now", "Now Playing".to_string())
    } else {
        (
            "idle",
            "Recently played",
            format!("Last played: {}", last_played_text(game.last_played, ctx.now)),
        )
    };

    let username = escape_attribute(player.display_name());
    let user_badge = match ctx.avatar.as_ref() {
        Some(avatar) => format!(
            r#"<img src="{}" class="user-avatar" alt="{}" />"#,
            avatar.data_uri(),
            username
        ),
        None => format!(r#"<div class="steam-logo-small">{STEAM_LOGO_SVG}</div>"#),
    };

    let background = match ctx.cover.as_ref() {
        Some(cover) => format!("url('{}')", cover.data_uri()),
        None => "none".to_string(),
    };

    format!(
        r#"<style>
{FONT_CSS}{GAME_CSS}.background-image {{ background-image: {background}; }}
</style>
<div class="background-image"></div>
<div class="vignette"></div>
<div class="header">
  <div class="status-indicator"><div class="status-dot {dot_class}"></div><div class="status-text">{status}</div></div>
  <div class="user-info">{user_badge}<div class="username">{username}</div></div>
</div>
<div class="footer">
  <div class="game-info">
    <div class="game-name">{name}</div>
    <div class="last-played">{detail}</div>
  </div>
  <div class="playtime"><span class="clock-icon">{CLOCK_ICON_SVG}</span>{playtime}</div>
</div>"#,
        name = escape_markup(&game.name),
        playtime = format_playtime(game.playtime_minutes),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::assets::EncodedAsset;
    use chrono::{TimeZone, Utc};

    fn player() -> Player {
        Player {
            display_name: None,
            avatar_url: Some("https://avatars/medium.jpg".to_string()),
            current_game: None,
        }
    }

    fn game() -> GameSession {
        GameSession {
            app_id: 271590,
            name: "Grand Theft Auto V".to_string(),
            playtime_minutes: 0,
            playtime_two_weeks_minutes: None,
            last_played: None,
            header_image_url: "https://cdn/271590/header.jpg".to_string(),
        }
    }

    fn ctx() -> BadgeContext {
        BadgeContext::empty(Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_logo_stands_in_for_missing_avatar() {
        let html = game_body(&player(), &game(), &ctx(), false);
        assert!(html.contains(r#"class="steam-logo-small""#));
        assert!(html.contains("Steam User"));
        assert!(html.contains("Last played: Never"));
        assert!(html.contains("0:00"));
        assert!(html.contains("background-image: none;"));
    }

    #[test]
    fn test_images_embedded_when_present() {
        let asset = EncodedAsset {
            mime: "image/jpeg".to_string(),
            base64: "SU1H".to_string(),
        };
        let ctx = BadgeContext {
            cover: Some(asset.clone()),
            avatar: Some(asset),
            ..ctx()
        };
        let html = game_body(&player(), &game(), &ctx, true);
        assert!(html.contains("background-image: url('data:image/jpeg;base64,SU1H');"));
        assert!(html.contains(r#"<img src="data:image/jpeg;base64,SU1H" class="user-avatar" alt="Steam User" />"#));
        assert!(html.contains("status-dot live"));
    }

    #[test]
    fn test_persona_name_cannot_break_markup() {
        let player = Player {
            display_name: Some(r#"say "hi" <3"#.to_string()),
            ..player()
        };
        let ctx = BadgeContext {
            avatar: Some(EncodedAsset {
                mime: "image/jpeg".to_string(),
                base64: "SU1H".to_string(),
            }),
            ..ctx()
        };
        let html = game_body(&player, &game(), &ctx, false);
        assert!(html.contains(r#"alt="say &quot;hi&quot; &lt;3" />"#));
        assert!(html.contains(r#"<div class="username">say &quot;hi&quot; &lt;3</div>"#));
        assert!(!html.contains(r#""hi""#));
        assert!(!html.contains("<3"));
    }
}
