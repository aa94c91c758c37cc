// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use live_badges::config::{Config, Endpoints};
use live_badges::routes::create_router;
use live_badges::AppState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const TOKEN_PATH: &str = "/accounts/api/token";
pub const CURRENTLY_PLAYING_PATH: &str = "/spotify/me/player/currently-playing";
pub const RECENTLY_PLAYED_PATH: &str = "/spotify/me/player/recently-played";
pub const PLAYER_SUMMARY_PATH: &str = "/steam/ISteamUser/GetPlayerSummaries/v2/";
pub const RECENT_GAMES_PATH: &str = "/steam/IPlayerService/GetRecentlyPlayedGames/v1/";
pub const OWNED_GAMES_PATH: &str = "/steam/IPlayerService/GetOwnedGames/v1/";

/// Canned upstream response.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(value: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/json",
            body: value.to_string().into_bytes(),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: Vec::new(),
        }
    }

    pub fn image(content_type: &'static str, bytes: &[u8]) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            body: bytes.to_vec(),
        }
    }
}

/// A request seen by the fake upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

struct FakeState {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process stand-in for Spotify, Steam and the image CDNs.
///
/// Unregistered paths answer 404. Every request is recorded so tests can
/// assert which upstreams were (or were not) called.
pub struct FakeUpstream {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeUpstream {
    /// Binds a TCP listener on port 0 and serves `replies` keyed by path.
    pub async fn spawn(replies: Vec<(&str, Reply)>) -> Self {
        let state = Arc::new(FakeState {
            replies: replies
                .into_iter()
                .map(|(path, reply)| (path.to_string(), reply))
                .collect(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(serve).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", addr.port()),
            state,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }

    pub fn total_hits(&self) -> usize {
        self.requests().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Config with every upstream pointed at this server.
    pub fn config(&self) -> Config {
        config_for(&self.base_url)
    }
}

async fn serve(State(state): State<Arc<FakeState>>, uri: Uri, headers: HeaderMap) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    match state.replies.get(uri.path()) {
        Some(reply) => (
            reply.status,
            [(header::CONTENT_TYPE, reply.content_type)],
            reply.body.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Test config whose upstreams all live under `base_url`.
pub fn config_for(base_url: &str) -> Config {
    let mut config = Config::test_default();
    config.endpoints = Endpoints {
        spotify_accounts_url: format!("{}/accounts", base_url),
        spotify_api_url: format!("{}/spotify", base_url),
        steam_api_url: format!("{}/steam", base_url),
        steam_cdn_url: format!("{}/cdn", base_url),
    };
    config
}

/// Base URL where nothing is listening, so every request fails to connect.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://127.0.0.1:{}", addr.port())
}

/// Create a test app from `config`.
/// Returns the router and the shared state.
pub fn create_test_app(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    (create_router(state.clone()), state)
}

/// Issue a GET against the router and collect the response.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

/// Assert the response obeys the badge contract: 200, SVG, one-second cache.
pub fn assert_badge_response(status: StatusCode, headers: &HeaderMap) {
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "image/svg+xml");
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "s-maxage=1");
}

pub fn token_reply() -> Reply {
    Reply::json(serde_json::json!({
        "access_token": "BQDxyz1234567890abcdef",
        "token_type": "Bearer",
        "expires_in": 3600,
        "scope": "user-read-currently-playing user-read-recently-played"
    }))
}

/// Spotify track object with one album image.
pub fn spotify_track(title: &str, artist: &str, image_url: &str) -> serde_json::Value {
    serde_json::json!({
        "name": title,
        "artists": [{ "name": artist }],
        "album": { "images": [{ "url": image_url, "width": 640, "height": 640 }] },
        "external_urls": { "spotify": "https://open.spotify.com/track/abc" }
    })
}

pub fn steam_player(avatar_url: &str) -> serde_json::Value {
    serde_json::json!({
        "response": { "players": [{
            "steamid": "76561198000000000",
            "personaname": "gordon",
            "avatarmedium": avatar_url
        }]}
    })
}
