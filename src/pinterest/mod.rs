//! # Pinterest Integration Module
//!
//! Thin calls against the Pinterest v5 REST API. Every call is a single
//! request with the user's bearer token taken from their cookie; responses
//! are relayed unchanged and failures are surfaced immediately without
//! retry or backoff.
//!
//! - [`auth`] - Authorization URL construction and the code-for-token exchange

pub mod auth;

use reqwest::Client;
use serde_json::Value;

use crate::{config::Config, error::AppError, utils};

/// Lists the boards of the connected user.
pub async fn list_boards(client: &Client, config: &Config, token: &str) -> Result<Value, AppError> {
    let url = format!("{}/boards", config.pinterest_api_url);
    utils::relay_json(client.get(&url).bearer_auth(token).send().await).await
}

/// Lists the pins on one board. The board id is forwarded verbatim.
pub async fn list_board_pins(
    client: &Client,
    config: &Config,
    token: &str,
    board_id: &str,
) -> Result<Value, AppError> {
    let url = format!("{}/boards/{}/pins", config.pinterest_api_url, board_id);
    utils::relay_json(client.get(&url).bearer_auth(token).send().await).await
}

/// Asks Pinterest whether `token` is still usable.
///
/// Any failure, including a network error, counts as not connected.
pub async fn verify_token(client: &Client, config: &Config, token: &str) -> bool {
    let url = format!("{}/user_account", config.pinterest_api_url);
    match client.get(&url).bearer_auth(token).send().await {
        Ok(res) => res.status().is_success(),
        Err(e) => {
            tracing::warn!("Pinterest token check failed: {}", e);
            false
        }
    }
}
