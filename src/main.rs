// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live-badges server
//!
//! Serves SVG badges showing what is playing on Spotify and Steam.

use live_badges::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        spotify = config.spotify.is_some(),
        steam = config.steam.is_some(),
        "Starting live-badges"
    );

    let port = config.port;
    let state = Arc::new(AppState::new(config)?);
    tracing::info!("Services initialized");

    // Build router
    let app = live_badges::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["live_badges=debug", "info"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::registry().with(filter).with(format).init();
}
