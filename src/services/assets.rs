// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-wide cache of images encoded for inline embedding.
//!
//! Cover art, avatars and game headers are fetched once per URL and kept
//! as base64 so badges can embed them as `data:` URIs. Entries are bounded
//! by count (least recently used goes first) and by age; either bound can
//! be disabled.
//!
//! There is no per-key lock. Two requests missing the same URL at once both
//! fetch and both insert, and the last write wins. Both values come from the
//! same URL, so the race is harmless.

use crate::config::AssetCacheConfig;
use crate::error::AppError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use dashmap::DashMap;
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// MIME type assumed when the image response does not declare one.
const DEFAULT_MIME: &str = "image/jpeg";

/// An image ready to embed in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAsset {
    pub mime: String,
    pub base64: String,
}

impl EncodedAsset {
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

#[derive(Clone)]
struct CachedAsset {
    asset: EncodedAsset,
    fetched_at: Instant,
    last_used: Instant,
}

/// Shared image cache. Clones share the same entries.
#[derive(Clone)]
pub struct AssetCache {
    http: reqwest::Client,
    entries: Arc<DashMap<String, CachedAsset>>,
    max_entries: Option<usize>,
    ttl: Option<Duration>,
}

impl AssetCache {
    pub fn new(http: reqwest::Client, config: &AssetCacheConfig) -> Self {
        Self {
            http,
            entries: Arc::new(DashMap::new()),
            max_entries: config.max_entries,
            ttl: config.ttl,
        }
    }

    /// Get the encoded image at `url`, fetching it on a miss.
    ///
    /// Failures are returned to the caller, which decides what to show
    /// instead.
    pub async fn get(&self, url: &str) -> Result<EncodedAsset, AppError> {
        if let Some(asset) = self.lookup(url) {
            return Ok(asset);
        }

        let asset = self.fetch(url).await?;
        self.insert(url, asset.clone());
        Ok(asset)
    }

    /// Number of cached entries, expired ones included until next touched.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, url: &str) -> Option<EncodedAsset> {
        let now = Instant::now();
        {
            let mut entry = self.entries.get_mut(url)?;
            if !self.is_expired(&entry, now) {
                entry.last_used = now;
                return Some(entry.asset.clone());
            }
        }
        // Shard guard released above; removing while holding it deadlocks.
        self.remove_if_expired(url, now);
        None
    }

    /// Remove `url` only if still expired at `now`. A concurrent miss may
    /// have replaced it with a fresh entry since the lookup.
    fn remove_if_expired(&self, url: &str, now: Instant) {
        self.entries
            .remove_if(url, |_, entry| self.is_expired(entry, now));
    }

    fn is_expired(&self, entry: &CachedAsset, now: Instant) -> bool {
        self.ttl
            .is_some_and(|ttl| now.duration_since(entry.fetched_at) >= ttl)
    }

    fn insert(&self, url: &str, asset: EncodedAsset) {
        if let Some(max) = self.max_entries {
            while self.entries.len() >= max && !self.entries.contains_key(url) {
                if !self.evict_least_recently_used() {
                    break;
                }
            }
        }

        let now = Instant::now();
        self.entries.insert(
            url.to_string(),
            CachedAsset {
                asset,
                fetched_at: now,
                last_used: now,
            },
        );
    }

    fn evict_least_recently_used(&self) -> bool {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.last_used)
            .map(|entry| entry.key().clone());

        match oldest {
            Some(key) => {
                tracing::debug!(url = %key, "Evicting cached asset");
                self.entries.remove(&key);
                true
            }
            None => false,
        }
    }

    async fn fetch(&self, url: &str) -> Result<EncodedAsset, AppError> {
        tracing::debug!(url, "Fetching asset");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::AssetFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::AssetFetch(format!(
                "HTTP {} for {}",
                response.status(),
                url
            )));
        }

        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::trim)
            .filter(|v| v.starts_with("image/"))
            .unwrap_or(DEFAULT_MIME)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::AssetFetch(format!("Failed to read image body: {}", e)))?;

        Ok(EncodedAsset {
            mime,
            base64: BASE64.encode(&bytes),
        })
    }
}
