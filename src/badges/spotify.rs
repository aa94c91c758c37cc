// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spotify track layouts.

use super::{escape_markup, BadgeContext, FONT_CSS};
use crate::models::Track;
use std::fmt::Write;

/// Equalizer geometry, in pixels.
const BARS_WIDTH: u32 = 300;
const BAR_WIDTH: u32 = 3;
const BAR_GAP: u32 = 3;
const BAR_COUNT: u32 = BARS_WIDTH / (BAR_WIDTH + BAR_GAP);

/// Animation duration of equalizer bar `index`, spread over 500..1500 ms.
///
/// Derived from the index alone so the same track always renders the same
/// markup.
pub fn bar_duration_ms(index: u32) -> u32 {
    500 + (index.wrapping_mul(373).wrapping_add(149)) % 1000
}

const TRACK_CSS: &str = r#"
.container { background-color: #121212; border-radius: 10px; padding: 10px 10px 20px 10px; }
.playing { display: flex; justify-content: center; align-items: center; color: #53b14f; font-weight: bold; text-align: center; margin-bottom: 8px; }
.artist { color: #fff; font-weight: bold; font-size: 20px; text-align: center; margin-bottom: 5px; }
.song { color: #b3b3b3; font-size: 16px; text-align: center; margin-bottom: 5px; }
.logo { margin-left: 5px; }
.cover { border-radius: 5px; margin-bottom: 10px; }
.cover-placeholder { width: 300px; height: 300px; margin: 0 auto 10px auto; border-radius: 5px; background-color: #282828; }
"#;

const BARS_CSS: &str = r#"
#bars { height: 30px; position: relative; margin: 0 auto 15px auto; width: 300px; overflow: hidden; }
.bar { background: #53b14f; bottom: 1px; height: 3px; position: absolute; width: 3px; animation: sound 0ms -800ms linear infinite alternate; }
@keyframes sound { 0% { opacity: .35; height: 3px; } 100% { opacity: 1; height: 15px; } }
"#;

/// Spotify logo, 35×35 PNG.
const LOGO_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAACMAAAAjCAYAAAAe2bNZAAAE5ElEQVRYR81WS08bVxQ+dzweY48fQCCBllJDmqpRSx6gKizSiAUbILZjA21KVEhF20hNlLb/IKu2m3QRKaqQogIRkAXhYQxFSJGCQqVKrVSBQtpCFqEQkrQhxnb8Yjxzp7oTmdjjsWd4LHIlLzz3PL57zvedexG8Qgu9Qlhg22Bqumr0+/L2VdAMOpBvtdgCoedBnhPvsw/YpcFLg9x2DrklMA19DVajkf4B0dQnAMDkSJgQedwfWot9fevcraBWYJrA1HXX5RUWWG8jhGq1Bk7aiVj8PfGfWOc754uq+aqCOXXT8bFOTw2oBVLb5zmhw9s6fj2XXU4wniFnF6LRF2qJtO6LPPQMN3s/zWafFcxuA0kCwILYO+IZO6sESBHMbrUmWwVwQjw70jLWK9/PAEPIuqfQFtNa+u3acU8wKyd1BhjPqPNXJdVgHkP8WRwiqxGI/RsDLsSBiEXQGXRgKDCAqcQk/RgbA4hS1QXx/WPYPVaTepg0LzJHTBZmcy5wQQ5mL89CeCUMIGqvAQFjLjeD/aQdiqqLsoKLh/nCiTMT68nIaWA8Q45riKY6k5szF2YgEU5oR5HFkn2dhUNfHQLjXmOaBRZw34jHRwaotNLANHtdG6mTdaF3AVZvrwJCCNgyFoqOFIHtgA2MxUbQGXXSdyxg4MM8RJ9EYf2vdfDf80PsaUyxkqSNtd+nzU1+yOXVZ4Ahd429pCzjTiG80MIBeVH4GA/Lk8uw/PMyEL4lV9XFKiiuLt78H/2Hy5u8OEmK8LIyjb2Nbxvz9Qu5eiIKokTcuD8OfISXTk+zNOQV5r0grk6ZuIGFAMxdnpMIf+LHE0Dpqc00XCT+nq9t6l4aGOeNpia9iR6XgyHKuXv1rjYSI5BaWN5QDqUflAJFv0ya7ZBCHLeMfuQbSgPTPnG6LcLH+uVOM+dnIBFRIHGyCDlURgh7+JvDYCo1ZS04qzd3Xm/s/0lTZQJ/B2BxYBHK6sug+Ggx6M16Ge1BahdRHSHvytQKhB6E0pITMLXfKV/4QgK3jLbIKqOFM1vROFHW/NX5zdFw7NtjwL7GZoSIB/mqifaJ+bTKtF5qZfBRTmK14hIBuOccRB5GIPIoAhv+DeDjPDBWBsxvmMFaaQVDviGjaut/rkNgMQAVpyoUwyqqiVg2e11E2pu6l7xFgDtf3gEiVS2LgNv/4X4oPV6qxVx5zhBPz5CjG9FU2vUuiiJMd05LcrRWWKHg3QKwvGkBJv/FHUQkHl4Ow9rsGhAJp86USncl2F32rKCwgG+MeHxtSYO0wVDfVW+zlbABLUfKLlUBFvsW4fEvjyWTg50HJZkrrfDT+J6pz6b8imCk6ow4f0MUen8ngKTuCiIsjS+B3WFXnOAiFueG3WNHUvNkjExHl8PElFCRnYJR83/2MGiZPj8dzgmGbLoGT7bTjC7jJaaWQOs+zwmfe1vHr8ntc7yBXd2IBsW3qtakSnYixgPDbt8Zpb2cTzL3sLOH0qGOnSRP9c0FhNipvg/dN5s6KD3ds1NA2Vqjyhl5YkJq/V40gyhUvVVQRDX+R6HjcrJuuU1yh6b+pgLGSF2hdNRpAKBzAOOxgAejfu5C6hxRO4hqm7IFaLjSYKCL8Fs6HfOO1WK1haKhYCKKF3AA30++3NSSa1bTVgPthv22K7MbyeUx/gfIiuIzZiZJFQAAAABJRU5ErkJggg==";

pub(super) const ERROR_BODY: &str = r#"<style>
div { font-family: -apple-system, BlinkMacSystemFont, Segoe UI, Helvetica, Arial, sans-serif, Apple Color Emoji, Segoe UI Emoji; }
.container { background-color: #121212; border-radius: 10px; padding: 10px 10px; }
.playing { display: flex; justify-content: center; align-items: center; color: #ff1616; font-weight: bold; text-align: center; margin-bottom: 8px; }
</style>
<div class="playing">
  Error connecting to Spotify
</div>"#;

/// Per-bar position and animation speed.
fn bar_css() -> String {
    let mut css = String::new();
    for i in 0..BAR_COUNT {
        let _ = writeln!(
            css,
            ".bar:nth-child({}) {{ left: {}px; animation-duration: {}ms; }}",
            i + 1,
            i * (BAR_WIDTH + BAR_GAP),
            bar_duration_ms(i)
        );
    }
    css
}

fn bars() -> String {
    r#"<div class="bar"></div>"#.repeat(BAR_COUNT as usize)
}

/// Body of both track layouts; `now_playing` adds the equalizer.
pub(super) fn track_body(track: &Track, ctx: &BadgeContext, now_playing: bool) -> String {
    let heading = if now_playing {
        "Now playing on"
    } else {
        "Recently played on"
    };

    let mut html = String::new();
    html.push_str("<style>\n");
    html.push_str(FONT_CSS);
    html.push_str(TRACK_CSS);
    if now_playing {
        html.push_str(BARS_CSS);
        html.push_str(&bar_css());
    }
    html.push_str("</style>\n");

    let _ = write!(
        html,
        r#"<div class="playing">{heading} <img class="logo" src="data:image/png;base64,{LOGO_PNG}" /></div>
<div class="artist">{title}</div>
<div class="song">{artists}</div>
"#,
        title = escape_markup(&track.title),
        artists = escape_markup(&track.artist_line()),
    );

    if now_playing {
        let _ = writeln!(html, r#"<div id="bars">{}</div>"#, bars());
    }

    let cover = match ctx.cover.as_ref() {
        Some(asset) => format!(
            r#"<center><img src="{}" width="300" height="300" class="cover" /></center>"#,
            asset.data_uri()
        ),
        None => r#"<div class="cover-placeholder"></div>"#.to_string(),
    };
    match &track.external_url {
        Some(url) => {
            let _ = write!(
                html,
                r#"<a href="{}" target="_BLANK">{}</a>"#,
                escape_markup(url),
                cover
            );
        }
        None => html.push_str(&cover),
    }

    html
}
