use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    body::Body,
    http::Request,
    routing::{get, post},
};
use reqwest::Client;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{Span, info};

use crate::{Res, api, config::Config};

/// Shared by every handler. Configuration is read-only after startup and the
/// HTTP client is only a connection pool, so nothing mutable is shared
/// between requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
}

impl AppState {
    /// Outbound calls are made without a timeout, so an unresponsive
    /// provider holds its request open.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            http: Client::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let index = state.config.static_dir.join("index.html");
    let static_files = ServeDir::new(&state.config.static_dir).fallback(ServeFile::new(index));

    Router::new()
        .route("/health", get(api::health))
        .route("/api/auth/pinterest/url", get(api::auth_url))
        .route("/api/auth/pinterest/callback", get(api::callback))
        .route("/api/pinterest/status", get(api::status))
        .route("/api/pinterest/boards", get(api::boards))
        .route("/api/pinterest/boards/{board_id}/pins", get(api::board_pins))
        .route("/api/unsplash/search", get(api::search))
        .route("/api/images/unsplash", get(api::unsplash_grid))
        .route("/api/images/pinterest/{board_id}", get(api::pinterest_grid))
        .route("/api/proxy-image", post(api::proxy_image))
        .route("/api/analyze", post(api::analyze))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

/// Request span with the path only. Query strings stay out of the logs since
/// the OAuth callback carries `code` and `state` there.
pub fn request_span(request: &Request<Body>) -> Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        version = ?request.version(),
    )
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = SocketAddr::from_str(&config.server_address)?;
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("moodboard listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
