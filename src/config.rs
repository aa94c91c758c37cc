// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Read once at startup. Each platform's credentials are optional on their
//! own: a platform with missing credentials serves its error badge without
//! touching the network, while the other platform keeps working.

use std::env;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Spotify OAuth credentials (None if any required value is missing)
    pub spotify: Option<SpotifyCredentials>,
    /// Steam Web API credentials (None if any required value is missing)
    pub steam: Option<SteamCredentials>,
    /// App id shown in preference to the most recent game when owned
    pub steam_favorite_app_id: Option<u64>,
    /// Upstream base URLs
    pub endpoints: Endpoints,
    /// Image cache bounds
    pub asset_cache: AssetCacheConfig,
}

/// Static Spotify credentials.
#[derive(Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
    /// Long-lived refresh token exchanged for an access token per request
    pub refresh_token: String,
}

// Secrets stay out of Debug output.
impl std::fmt::Debug for SpotifyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyCredentials")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Static Steam credentials.
#[derive(Clone)]
pub struct SteamCredentials {
    pub api_key: String,
    /// 64-bit Steam ID of the profile shown on the badge
    pub user_id: u64,
}

impl std::fmt::Debug for SteamCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteamCredentials")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// Base URLs of every upstream the service talks to.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub spotify_accounts_url: String,
    pub spotify_api_url: String,
    pub steam_api_url: String,
    /// Root of the per-app header images (`<root>/<appid>/header.jpg`)
    pub steam_cdn_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            spotify_accounts_url: "https://accounts.spotify.com".to_string(),
            spotify_api_url: "https://api.spotify.com/v1".to_string(),
            steam_api_url: "https://api.steampowered.com".to_string(),
            steam_cdn_url: "https://cdn.cloudflare.steamstatic.com/steam/apps".to_string(),
        }
    }
}

/// Bounds of the process-wide image cache. `None` means unbounded.
#[derive(Debug, Clone)]
pub struct AssetCacheConfig {
    pub max_entries: Option<usize>,
    pub ttl: Option<Duration>,
}

impl Default for AssetCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: Some(256),
            ttl: Some(Duration::from_secs(24 * 60 * 60)),
        }
    }
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            spotify: Some(SpotifyCredentials {
                client_id: "test_client_id".to_string(),
                client_secret: "test_secret".to_string(),
                refresh_token: "test_refresh_token".to_string(),
            }),
            steam: Some(SteamCredentials {
                api_key: "test_api_key".to_string(),
                user_id: 76561198000000000,
            }),
            steam_favorite_app_id: None,
            endpoints: Endpoints::default(),
            asset_cache: AssetCacheConfig::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Missing or malformed platform settings disable only what they belong
    /// to; the remaining malformed values are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let spotify = match SpotifyCredentials::from_env() {
            Ok(creds) => Some(creds),
            Err(ConfigError::Missing(name)) => {
                tracing::warn!(variable = name, "Spotify badge disabled: missing credential");
                None
            }
            Err(e) => return Err(e),
        };

        let steam = match SteamCredentials::from_env() {
            Ok(creds) => Some(creds),
            Err(ConfigError::Missing(name)) => {
                tracing::warn!(variable = name, "Steam badge disabled: missing credential");
                None
            }
            Err(ConfigError::Invalid(name)) => {
                tracing::warn!(variable = name, "Steam badge disabled: invalid credential");
                None
            }
        };

        let steam_favorite_app_id = match parse_optional("STEAM_FAVORITE_APP_ID") {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring favorite app");
                None
            }
        };

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            spotify_accounts_url: optional("SPOTIFY_ACCOUNTS_URL")
                .unwrap_or(defaults.spotify_accounts_url),
            spotify_api_url: optional("SPOTIFY_API_URL").unwrap_or(defaults.spotify_api_url),
            steam_api_url: optional("STEAM_API_URL").unwrap_or(defaults.steam_api_url),
            steam_cdn_url: optional("STEAM_CDN_URL").unwrap_or(defaults.steam_cdn_url),
        };

        let cache_defaults = AssetCacheConfig::default();
        let asset_cache = AssetCacheConfig {
            max_entries: match parse_optional::<usize>("ASSET_CACHE_MAX_ENTRIES")? {
                Some(0) => None,
                Some(n) => Some(n),
                None => cache_defaults.max_entries,
            },
            ttl: match parse_optional::<u64>("ASSET_CACHE_TTL_SECS")? {
                Some(0) => None,
                Some(secs) => Some(Duration::from_secs(secs)),
                None => cache_defaults.ttl,
            },
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            spotify,
            steam,
            steam_favorite_app_id,
            endpoints,
            asset_cache,
        })
    }
}

impl SpotifyCredentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: required("SPOTIFY_CLIENT_ID")?,
            client_secret: required("SPOTIFY_SECRET_ID")?,
            refresh_token: required("SPOTIFY_REFRESH_TOKEN")?,
        })
    }
}

impl SteamCredentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = required("STEAM_API_KEY")?;
        let user_id = required("STEAM_USER_ID")?
            .parse()
            .map_err(|_| ConfigError::Invalid("STEAM_USER_ID"))?;
        Ok(Self { api_key, user_id })
    }
}

/// Read a variable, treating empty or whitespace-only values as unset.
fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn parse_optional<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    optional(name)
        .map(|v| v.parse().map_err(|_| ConfigError::Invalid(name)))
        .transpose()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment is process-global, so everything touching it lives in
    // one test.
    #[test]
    fn test_config_from_env() {
        env::set_var("SPOTIFY_CLIENT_ID", "test_id");
        env::set_var("SPOTIFY_SECRET_ID", "test_secret");
        env::set_var("SPOTIFY_REFRESH_TOKEN", "  test_refresh  ");
        env::set_var("STEAM_API_KEY", "key");
        env::set_var("STEAM_USER_ID", "   ");
        env::set_var("STEAM_FAVORITE_APP_ID", "271590");
        env::set_var("ASSET_CACHE_MAX_ENTRIES", "0");
        env::remove_var("ASSET_CACHE_TTL_SECS");

        let config = Config::from_env().expect("Config should load");

        let spotify = config.spotify.expect("spotify credentials");
        assert_eq!(spotify.client_id, "test_id");
        assert_eq!(spotify.refresh_token, "test_refresh");
        assert!(config.steam.is_none(), "blank user id counts as missing");
        assert_eq!(config.steam_favorite_app_id, Some(271590));
        assert_eq!(config.asset_cache.max_entries, None);
        assert_eq!(
            config.asset_cache.ttl,
            Some(Duration::from_secs(24 * 60 * 60))
        );
        assert_eq!(config.port, 8080);

        // A vanity name instead of the numeric id disables Steam only.
        env::set_var("STEAM_USER_ID", "my-vanity-name");
        let config = Config::from_env().expect("Config should load");
        assert!(config.steam.is_none());
        assert!(config.spotify.is_some());

        env::set_var("STEAM_USER_ID", "76561198000000000");
        env::set_var("STEAM_FAVORITE_APP_ID", "gta");
        let config = Config::from_env().expect("Config should load");
        assert_eq!(
            config.steam.map(|steam| steam.user_id),
            Some(76561198000000000)
        );
        assert_eq!(config.steam_favorite_app_id, None);

        // Cache bounds have no per-platform fallback.
        env::set_var("ASSET_CACHE_MAX_ENTRIES", "lots");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("ASSET_CACHE_MAX_ENTRIES"))
        ));
        env::remove_var("ASSET_CACHE_MAX_ENTRIES");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = Config::test_default();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("test_secret"));
        assert!(!rendered.contains("test_refresh_token"));
        assert!(!rendered.contains("test_api_key"));
    }
}
