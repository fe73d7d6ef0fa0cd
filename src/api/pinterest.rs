use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::Value;

use crate::{
    error::AppError,
    pinterest,
    server::AppState,
    types::StatusResponse,
    utils::ACCESS_TOKEN_COOKIE,
};

/// The Pinterest access token from the request's cookie, if any.
pub fn access_token(jar: &CookieJar) -> Option<String> {
    jar.get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

fn require_token(jar: &CookieJar) -> Result<String, AppError> {
    access_token(jar).ok_or(AppError::Unauthorized)
}

/// Reports whether the browser holds a Pinterest token.
///
/// Without `PINTEREST_VALIDATE_STATUS` this is cookie presence only, so a
/// revoked or expired token reads as connected until a board call fails.
pub async fn status(State(state): State<AppState>, jar: CookieJar) -> Json<StatusResponse> {
    let connected = match access_token(&jar) {
        None => false,
        Some(_) if !state.config.validate_pinterest_status => true,
        Some(token) => pinterest::verify_token(&state.http, &state.config, &token).await,
    };

    Json(StatusResponse { connected })
}

pub async fn boards(State(state): State<AppState>, jar: CookieJar) -> Result<Json<Value>, AppError> {
    let token = require_token(&jar)?;
    let boards = pinterest::list_boards(&state.http, &state.config, &token).await?;
    Ok(Json(boards))
}

pub async fn board_pins(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    jar: CookieJar,
) -> Result<Json<Value>, AppError> {
    let token = require_token(&jar)?;
    let pins = pinterest::list_board_pins(&state.http, &state.config, &token, &board_id).await?;
    Ok(Json(pins))
}
