use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::{self, AppState};
use crate::config::ServerConfig;

/// Largest request body the API accepts
const BODY_LIMIT_BYTES: usize = 64 * 1024;

const BANNER: &str = "API de Recomendación Turística";

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api", api::router(state))
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
}

async fn root() -> &'static str {
    BANNER
}

pub async fn run(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", config.port);
    serve(listener, state).await
}

/// Serve on an already bound listener
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, app(state))
        .await
        .context("Web server stopped unexpectedly")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_root_banner() {
        let response = app(AppState::with_catalog(Vec::new()))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes, BANNER.as_bytes());
    }

    #[tokio::test]
    async fn test_cors_headers_present() {
        let response = app(AppState::with_catalog(Vec::new()))
            .oneshot(
                Request::get("/api/attractions")
                    .header("origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let body = format!(
            r#"{{"interests": ["{}"], "duration": 2, "budget": "low"}}"#,
            "x".repeat(BODY_LIMIT_BYTES)
        );
        let response = app(AppState::with_catalog(Vec::new()))
            .oneshot(
                Request::post("/api/recommendations")
                    .header("content-type", "application/json")
                    .header("content-length", body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_small_body_passes_limit() {
        let response = app(AppState::with_catalog(Vec::new()))
            .oneshot(
                Request::post("/api/recommendations")
                    .header("content-type", "application/json")
                    .header("origin", "http://localhost:3000")
                    .body(Body::from(
                        r#"{"interests": [], "duration": 2, "budget": "low"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("access-control-allow-origin"));
    }
}
