// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Security headers middleware.
//!
//! Badges are SVG documents with inline styles and `data:` images, so the
//! content policy permits exactly those and nothing else.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

const CONTENT_SECURITY_POLICY: &str =
    "default-src 'none'; img-src data:; style-src 'unsafe-inline'";

/// Add security headers to all responses.
pub async fn add_security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        "Content-Security-Policy",
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );
    headers.insert("Referrer-Policy", HeaderValue::from_static("no-referrer"));

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::{routing::get, Router};
    use tower::ServiceExt; // for oneshot

    #[tokio::test]
    async fn test_security_headers() {
        let app = Router::new()
            .route("/", get(|| async { "<svg/>" }))
            .layer(axum::middleware::from_fn(add_security_headers));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();

        assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
        assert_eq!(
            headers.get("Content-Security-Policy").unwrap(),
            "default-src 'none'; img-src data:; style-src 'unsafe-inline'"
        );
        assert_eq!(headers.get("Referrer-Policy").unwrap(), "no-referrer");
        // Badges must stay embeddable.
        assert!(headers.get("X-Frame-Options").is_none());
    }
}
