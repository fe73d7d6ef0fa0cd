use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;

use crate::{error::AppError, server::AppState, types::SearchParams, unsplash};

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, AppError> {
    let results =
        unsplash::search_photos(&state.http, &state.config, params.query.as_deref()).await?;
    Ok(Json(results))
}
