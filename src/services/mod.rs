// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - upstream clients, caching and activity resolution.

pub mod assets;
pub mod resolver;
pub mod spotify;
pub mod steam;
pub mod token;

pub use assets::{AssetCache, EncodedAsset};
pub use resolver::{ActivityResolver, GameDecider, GameSources};
pub use spotify::SpotifyClient;
pub use steam::SteamClient;
pub use token::{AccessToken, TokenProvider};
