//! HTTP server for the verification service
//!
//! Stateless JSON API consumed by the browser client. Every route is a pure
//! request/response flow; the router state is only the shared [`Verifier`].

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{DefaultBodyLimit, Request};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::verifier::Verifier;

/// Middleware to add security headers
async fn add_security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    response
}

/// CORS policy for the browser client, which is served from its own origin.
///
/// Any origin is allowed unless `allowed_origin` pins one.
pub fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION]);

    match allowed_origin {
        Some(origin) => {
            let origin = HeaderValue::from_str(origin).with_context(|| format!("invalid allowed origin: {origin}"))?;
            Ok(layer.allow_origin(origin))
        }
        None => Ok(layer.allow_origin(Any)),
    }
}

/// Build the axum router
pub fn create_router(verifier: Arc<Verifier>, cors: CorsLayer) -> Router {
    // compare-files carries two uploads in one body
    let body_limit = verifier.policy().body_limit(2);

    Router::new()
        .route("/generate-code", post(handlers::generate_code))
        .route("/verify-code", post(handlers::verify_code))
        .route("/compare-files", post(handlers::compare_files))
        .route("/download-report", post(handlers::download_report))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(add_security_headers))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(verifier)
}

/// Start the HTTP server and run until Ctrl-C.
pub async fn start_http_server(addr: SocketAddr, verifier: Arc<Verifier>, allowed_origin: Option<&str>) -> Result<()> {
    let router = create_router(verifier, cors_layer(allowed_origin)?);
    let listener = TcpListener::bind(addr).await.with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("HTTP server starting on http://{}", listener.local_addr()?);

    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }

    tracing::info!("HTTP server shutting down gracefully");
}
