// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spotify access token exchange.
//!
//! A fresh access token is obtained from the long-lived refresh token on
//! every badge request. Nothing is cached: the token lives only as long as
//! the request that asked for it.

use crate::config::SpotifyCredentials;
use crate::error::AppError;
use serde::Deserialize;

/// Number of leading characters of a token that may appear in diagnostics.
const TOKEN_PREVIEW_CHARS: usize = 10;

/// Short-lived bearer token returned by the accounts service.
#[derive(Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub scope: String,
}

impl AccessToken {
    /// Non-sensitive prefix of the bearer value, safe to log.
    pub fn preview(&self) -> String {
        preview(&self.access_token, TOKEN_PREVIEW_CHARS)
    }
}

// Only the preview ever reaches Debug output.
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &self.preview())
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

/// First `chars` characters of `secret` followed by an ellipsis.
pub fn preview(secret: &str, chars: usize) -> String {
    let prefix: String = secret.chars().take(chars).collect();
    format!("{}...", prefix)
}

/// Exchanges a refresh token for an access token.
#[derive(Clone)]
pub struct TokenProvider {
    http: reqwest::Client,
    token_url: String,
}

impl TokenProvider {
    pub fn new(http: reqwest::Client, accounts_url: &str) -> Self {
        Self {
            http,
            token_url: format!("{}/api/token", accounts_url.trim_end_matches('/')),
        }
    }

    /// Refresh the access token. Single attempt, no retry.
    pub async fn refresh(&self, credentials: &SpotifyCredentials) -> Result<AccessToken, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", credentials.refresh_token.as_str()),
                ("client_id", credentials.client_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Token refresh request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Spotify token refresh rejected");
            return Err(AppError::Auth(format!(
                "Token refresh failed with status {}",
                status
            )));
        }

        let token: AccessToken = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Failed to parse token response: {}", e)))?;

        if token.access_token.is_empty() {
            return Err(AppError::Auth("Empty access token".to_string()));
        }

        tracing::debug!(
            token = %token.preview(),
            expires_in = token.expires_in,
            "Spotify access token refreshed"
        );
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("BQDx1234567890abcdef", 10), "BQDx123456...");
        assert_eq!(preview("short", 10), "short...");
    }

    #[test]
    fn test_debug_shows_only_preview() {
        let token = AccessToken {
            access_token: "BQDx1234567890abcdef".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
            scope: "user-read-currently-playing".to_string(),
        };
        let rendered = format!("{:?}", token);
        assert!(rendered.contains("BQDx123456..."));
        assert!(!rendered.contains("abcdef"));
    }

    #[test]
    fn test_token_url() {
        let provider = TokenProvider::new(reqwest::Client::new(), "https://accounts.spotify.com/");
        assert_eq!(provider.token_url, "https://accounts.spotify.com/api/token");
    }
}
