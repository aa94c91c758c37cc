// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token exchange diagnostics.
//!
//! Reports which Spotify credentials are configured and whether the refresh
//! token can be exchanged, showing only short prefixes of any secret.

use crate::services::token::preview;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Serialize;
use std::sync::Arc;

/// Characters of the Authorization header shown in diagnostics.
const AUTH_HEADER_PREVIEW_CHARS: usize = 15;

/// Diagnostics routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/spotify-debug", get(spotify_debug))
}

#[derive(Debug, Serialize)]
pub struct SpotifyDebugResponse {
    pub success: bool,
    pub message: String,
    pub diagnostics: CredentialDiagnostics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_info: Option<TokenInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CredentialDiagnostics {
    pub client_id: &'static str,
    pub client_secret: &'static str,
    pub refresh_token: &'static str,
    pub auth_header: String,
}

#[derive(Debug, Serialize)]
pub struct TokenInfo {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub scope: String,
}

fn presence(present: bool) -> &'static str {
    if present {
        "present"
    } else {
        "missing"
    }
}

/// Exchange the refresh token once and describe the outcome.
async fn spotify_debug(State(state): State<Arc<AppState>>) -> Json<SpotifyDebugResponse> {
    let Some(credentials) = state.config.spotify.as_ref() else {
        // Credentials load all-or-nothing, so report what the environment has.
        let has = |name: &str| std::env::var(name).is_ok_and(|v| !v.trim().is_empty());
        return Json(SpotifyDebugResponse {
            success: false,
            message: "One or more credentials are missing".to_string(),
            diagnostics: CredentialDiagnostics {
                client_id: presence(has("SPOTIFY_CLIENT_ID")),
                client_secret: presence(has("SPOTIFY_SECRET_ID")),
                refresh_token: presence(has("SPOTIFY_REFRESH_TOKEN")),
                auth_header: "not generated".to_string(),
            },
            token_info: None,
            error: None,
        });
    };

    let auth_header = format!(
        "Basic {}",
        BASE64.encode(format!(
            "{}:{}",
            credentials.client_id, credentials.client_secret
        ))
    );
    let diagnostics = CredentialDiagnostics {
        client_id: presence(true),
        client_secret: presence(true),
        refresh_token: presence(true),
        auth_header: preview(&auth_header, AUTH_HEADER_PREVIEW_CHARS),
    };

    let response = match state.tokens.refresh(credentials).await {
        Ok(token) => SpotifyDebugResponse {
            success: true,
            message: "Access token obtained".to_string(),
            diagnostics,
            token_info: Some(TokenInfo {
                access_token: token.preview(),
                token_type: token.token_type,
                expires_in: token.expires_in,
                scope: token.scope,
            }),
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Spotify token diagnostics: exchange failed");
            SpotifyDebugResponse {
                success: false,
                message: "Failed to obtain access token".to_string(),
                diagnostics,
                token_info: None,
                error: Some(e.to_string()),
            }
        }
    };

    Json(response)
}
