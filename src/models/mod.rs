// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models shared by the resolvers and the badge renderer.

pub mod activity;
pub mod game;
pub mod track;

pub use activity::{Platform, ResolvedActivity};
pub use game::{CurrentGame, GameSession, Player};
pub use track::Track;
