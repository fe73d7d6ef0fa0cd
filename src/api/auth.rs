use axum::{Json, extract::State};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::AppError,
    pinterest,
    server::AppState,
    types::AuthUrlResponse,
    utils,
};

/// Starts the OAuth flow: issues a fresh state cookie and returns the
/// Pinterest authorization URL for the popup.
pub async fn auth_url(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AuthUrlResponse>), AppError> {
    let client_id = state
        .config
        .pinterest_client_id
        .as_deref()
        .ok_or(AppError::NotConfigured("PINTEREST_CLIENT_ID"))?;

    let oauth_state = utils::generate_state_token();
    let url = pinterest::auth::authorize_url(&state.config, client_id, &oauth_state).map_err(
        |e| {
            tracing::error!("PINTEREST_AUTH_URL is invalid: {}", e);
            AppError::NotConfigured("PINTEREST_AUTH_URL")
        },
    )?;

    Ok((
        jar.add(utils::state_cookie(oauth_state)),
        Json(AuthUrlResponse { url }),
    ))
}
