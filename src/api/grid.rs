use axum::{
    Json,
    extract::{Path, Query, State},
};
use axum_extra::extract::cookie::CookieJar;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    api::pinterest::access_token,
    error::AppError,
    pinterest,
    server::AppState,
    types::{
        GridItem, GridResponse, ImageRecord, PhotoSearchResponse, PinListResponse, SearchParams,
    },
    unsplash,
};

/// Unsplash search results projected onto grid items.
pub async fn unsplash_grid(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<GridResponse>, AppError> {
    let raw = unsplash::search_photos(&state.http, &state.config, params.query.as_deref()).await?;
    let page: PhotoSearchResponse = decode(raw)?;

    Ok(Json(project(page.results.into_iter().map(ImageRecord::Photo))))
}

/// Pins of one board projected onto grid items.
pub async fn pinterest_grid(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    jar: CookieJar,
) -> Result<Json<GridResponse>, AppError> {
    let token = access_token(&jar).ok_or(AppError::Unauthorized)?;
    let raw = pinterest::list_board_pins(&state.http, &state.config, &token, &board_id).await?;
    let page: PinListResponse = decode(raw)?;

    Ok(Json(project(page.items.into_iter().map(ImageRecord::Pin))))
}

fn decode<T: DeserializeOwned>(raw: Value) -> Result<T, AppError> {
    serde_json::from_value(raw).map_err(|e| AppError::Upstream(Value::String(e.to_string())))
}

fn project(records: impl Iterator<Item = ImageRecord>) -> GridResponse {
    let items: Vec<GridItem> = records.filter_map(|r| r.to_grid_item()).collect();
    GridResponse { items }
}
