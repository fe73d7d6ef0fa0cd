use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use crate::server::AppState;

/// Liveness plus which providers have credentials, without revealing them.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "providers": {
            "pinterest": config.pinterest_client_id.is_some() && config.pinterest_client_secret.is_some(),
            "unsplash": config.unsplash_access_key.is_some(),
            "gemini": config.gemini_api_key.is_some(),
        }
    }))
}
