use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::warn;

use crate::{
    error::AppError,
    gemini::{self, AnalysisError},
    server::AppState,
    types::{AnalysisResult, ImageUrlRequest, ProxiedImage},
    utils,
};

/// Fetches a cross-origin image for the browser and returns it as base64.
///
/// Every failure, whether a bad URL, DNS, a non-2xx answer or a dropped
/// connection, is reported as the same "Failed to fetch image".
pub async fn proxy_image(
    State(state): State<AppState>,
    body: Result<Json<ImageUrlRequest>, JsonRejection>,
) -> Result<Json<ProxiedImage>, AppError> {
    let Json(req) = body.map_err(bad_body)?;
    let image = fetch(&state, req.url.as_deref()).await?;
    Ok(Json(image))
}

/// Runs the palette/keywords/mood analysis for the image at `url`.
///
/// The key is checked before the image is fetched so that an unconfigured
/// server makes no outbound calls at all.
pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<ImageUrlRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(req) = body.map_err(bad_body)?;
    if state.config.gemini_api_key.is_none() {
        return Err(AppError::NotConfigured("GEMINI_API_KEY"));
    }

    let image = fetch(&state, req.url.as_deref()).await?;

    match gemini::analyze_image(&state.http, &state.config, &image).await {
        Ok(analysis) => Ok(Json(analysis)),
        Err(AnalysisError::NotConfigured) => Err(AppError::NotConfigured("GEMINI_API_KEY")),
        Err(e) => {
            tracing::error!("Image analysis failed: {}", e);
            Err(AppError::Analysis)
        }
    }
}

fn bad_body(rejection: JsonRejection) -> AppError {
    warn!("Rejected image request body: {}", rejection.body_text());
    AppError::BadRequest(rejection.body_text())
}

async fn fetch(state: &AppState, url: Option<&str>) -> Result<ProxiedImage, AppError> {
    let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
        warn!("image fetch requested without a url");
        return Err(AppError::ImageFetch);
    };

    utils::fetch_image(&state.http, url).await.map_err(|e| {
        warn!("Failed to fetch image {}: {}", url, e);
        AppError::ImageFetch
    })
}
