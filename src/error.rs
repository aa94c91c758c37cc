// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error taxonomy for the badge pipeline.
//!
//! None of these ever reach the viewer: the route handlers turn every
//! failure into the platform's error badge. They exist so each failure can
//! be classified (abort vs. degrade) and logged with context.

/// Pipeline error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Token exchange rejected: {0}")]
    Auth(String),

    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("Asset fetch failed: {0}")]
    AssetFetch(String),
}

impl AppError {
    /// Whether a data source failing with this error may be downgraded to
    /// "no data" instead of aborting the pipeline.
    pub fn is_degradable(&self) -> bool {
        matches!(self, AppError::UpstreamFailure(_))
    }
}

/// Result type alias for the pipeline.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_upstream_failures_degrade() {
        assert!(AppError::UpstreamFailure("HTTP 502".to_string()).is_degradable());
        assert!(!AppError::ConfigMissing("spotify").is_degradable());
        assert!(!AppError::Auth("invalid_grant".to_string()).is_degradable());
        assert!(!AppError::AssetFetch("timeout".to_string()).is_degradable());
    }
}
